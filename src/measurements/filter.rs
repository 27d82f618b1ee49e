//! Eligibility of a measurement for the overlap search.

use crate::measurements::Measurement;

/// Whether a measurement may take part in an overlap pair.
///
/// A measurement is eligible when:
/// * its hit is valid,
/// * its subdetector region code is strictly above `outer_region_boundary`
///   (the pixel subdetectors, codes 1 and 2, sit below the default boundary),
/// * its sensor has a single side assignment (glued composites are rejected).
///
/// Arguments
/// -----------------
/// * `measurement`: The measurement to screen.
/// * `outer_region_boundary`: Highest subdetector code excluded from the search.
///
/// Return
/// ----------
/// * `true` if the measurement can be paired.
#[inline]
pub fn is_eligible(measurement: &Measurement, outer_region_boundary: u8) -> bool {
    measurement.hit_type.is_valid()
        && measurement.det_id.subdet_code() > outer_region_boundary
        && measurement.det_id.sensor_side().is_single_sided()
}
