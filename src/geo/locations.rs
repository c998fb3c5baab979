//! Static name → coordinate table for the Costa del Sol / Costa de la Luz
//! coverage area.
//!
//! Lookups are case-insensitive. The table carries town centres; records that
//! share one resolve to the same point and get separated by the jitter pass.

use std::collections::HashMap;
use std::sync::LazyLock;

const LOCATIONS: &[(&str, f64, f64)] = &[
    ("alhaurín de la torre", 36.6634, -4.5618),
    ("alhaurín el grande", 36.6432, -4.6849),
    ("algeciras", 36.1408, -5.4562),
    ("antequera", 37.0179, -4.5613),
    ("artola", 36.4901, -4.7421),
    ("benahavís", 36.5203, -5.0454),
    ("benalmádena", 36.5954, -4.5161),
    ("cabopino", 36.4889, -4.7442),
    ("calahonda", 36.4862, -4.7046),
    ("casares", 36.4446, -5.2711),
    ("chiclana de la frontera", 36.4197, -6.1460),
    ("coín", 36.6592, -4.7566),
    ("cádiz", 36.5271, -6.2886),
    ("cártama", 36.7110, -4.6300),
    ("elviria", 36.4989, -4.7760),
    ("estepona", 36.4276, -5.1459),
    ("fuengirola", 36.5397, -4.6249),
    ("guadalmina", 36.4722, -5.0081),
    ("istán", 36.5829, -4.9453),
    ("la alcaidesa", 36.2550, -5.3127),
    ("la cala de mijas", 36.5112, -4.6519),
    ("la duquesa", 36.3549, -5.2314),
    ("la línea de la concepción", 36.1680, -5.3478),
    ("manilva", 36.3766, -5.2503),
    ("marbella", 36.5101, -4.8825),
    ("mijas", 36.5959, -4.6372),
    ("málaga", 36.7213, -4.4214),
    ("nerja", 36.7461, -3.8745),
    ("nueva andalucía", 36.4953, -4.9608),
    ("ojén", 36.5651, -4.8563),
    ("puerto banús", 36.4876, -4.9525),
    ("rincón de la victoria", 36.7174, -4.2753),
    ("ronda", 36.7462, -5.1613),
    ("san pedro de alcántara", 36.4857, -4.9899),
    ("san roque", 36.2106, -5.3837),
    ("sotogrande", 36.2849, -5.2727),
    ("sotogrande costa", 36.2901, -5.2802),
    ("tarifa", 36.0143, -5.6044),
    ("torremolinos", 36.6205, -4.4999),
    ("torrox", 36.7579, -3.9522),
    ("vélez-málaga", 36.7750, -4.1003),
];

static TABLE: LazyLock<HashMap<&'static str, (f64, f64)>> =
    LazyLock::new(|| LOCATIONS.iter().map(|(name, lat, lng)| (*name, (*lat, *lng))).collect());

/// Looks up the coordinate pair for a town or province name.
pub fn coordinates_for(name: &str) -> Option<(f64, f64)> {
    TABLE.get(name.trim().to_lowercase().as_str()).copied()
}
