//! # Peak-centered amplitude window
//!
//! Re-indexes a cluster's strip amplitudes into a fixed-width array whose central slot holds
//! the cluster's maximum amplitude. The output width `N` is a const generic and must be odd,
//! so that a center slot exists; an even `N` is rejected at compile time.
//!
//! ## Rules
//! -----------------
//! * The peak is the **first** strip reaching the maximum amplitude.
//! * Amplitude `i` lands in slot `i - peak + N / 2`.
//! * Amplitudes falling outside `[0, N)` are dropped.
//! * Unfilled slots are zero.
//!
//! ```rust
//! use stripoverlap::clusters::window::extract_window;
//!
//! let window: [u8; 5] = extract_window(&[3, 9, 4]);
//! assert_eq!(window, [0, 3, 9, 4, 0]);
//! ```

use crate::constants::Adc;

/// Index of the first maximum amplitude, or `None` for an empty slice.
fn first_peak(amplitudes: &[Adc]) -> Option<usize> {
    amplitudes
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, Adc)>, (i, &a)| match best {
            Some((_, max)) if a <= max => best,
            _ => Some((i, a)),
        })
        .map(|(i, _)| i)
}

/// Build the peak-centered amplitude window of a cluster.
///
/// Arguments
/// -----------------
/// * `amplitudes`: Strip amplitudes of the cluster, in strip order.
///
/// Return
/// ----------
/// * An `[Adc; N]` array with the first peak amplitude in slot `N / 2`; all zeros for an empty
///   input.
pub fn extract_window<const N: usize>(amplitudes: &[Adc]) -> [Adc; N] {
    const { assert!(N % 2 == 1, "window width must be odd") };

    let mut window = [0; N];
    let Some(peak) = first_peak(amplitudes) else {
        return window;
    };

    let half = N / 2;
    for (i, &a) in amplitudes.iter().enumerate() {
        // slot = i - peak + half, computed without underflow
        if i + half < peak {
            continue;
        }
        let slot = i + half - peak;
        if slot >= N {
            break;
        }
        window[slot] = a;
    }
    window
}
