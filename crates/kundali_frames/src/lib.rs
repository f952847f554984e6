//! Reference-frame helpers: precession, obliquity and the spherical /
//! equatorial conversions the ephemeris and house code need.

pub mod equatorial;
pub mod obliquity;
pub mod precession;
pub mod spherical;

pub use equatorial::{ecliptic_to_equatorial, EquatorialCoords};
pub use obliquity::{OBLIQUITY_J2000_DEG, mean_obliquity_deg, mean_obliquity_rad};
pub use precession::{general_precession_longitude_arcsec, general_precession_longitude_deg};
pub use spherical::{SphericalCoords, cartesian_to_spherical};
