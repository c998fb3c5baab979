//! Geocoding post-processor: coordinate resolution and spiral de-clustering.

use std::collections::HashMap;

use crate::store::Property;

use super::locations::coordinates_for;

/// Base radial step of the de-clustering spiral, in degrees.
/// Roughly a 30-50 metre shift at Mediterranean latitudes.
const JITTER_RADIUS: f64 = 0.0003;

/// Markers per spiral ring before the radius grows.
const RING_SIZE: usize = 12;

// == Apply Geocoding ==
/// Resolves coordinates for every record, then displaces co-located records
/// along a deterministic spiral so map markers stay visually distinct.
///
/// Output has the same length and order as the input. Records whose town and
/// province are both unknown keep their missing coordinates; that is not an
/// error. Running the transform on its own output is a no-op: resolved
/// records keep their coordinates and jittered ones no longer share a pair.
pub fn apply_geocoding(mut records: Vec<Property>) -> Vec<Property> {
    // 1. Resolve: fill missing coordinates from the location table,
    //    town first, province as fallback.
    for record in &mut records {
        if record.has_coordinates() {
            continue;
        }
        let name = if record.town.is_empty() {
            record.province.as_str()
        } else {
            record.town.as_str()
        };
        if let Some((lat, lng)) = coordinates_for(name) {
            record.latitude = lat;
            record.longitude = lng;
            record.is_geocoded = true;
        }
    }

    // 2. De-cluster: group records sharing a coordinate pair at 6-decimal
    //    precision, keeping the first member of each group at the centre.
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        if record.has_coordinates() {
            let key = format!("{:.6},{:.6}", record.latitude, record.longitude);
            groups.entry(key).or_default().push(index);
        }
    }

    for group in groups.values() {
        if group.len() < 2 {
            continue;
        }
        for (position, &index) in group.iter().enumerate() {
            if position == 0 {
                continue;
            }
            let angle = (position as f64) * (360.0 / group.len().min(RING_SIZE) as f64);
            let angle = angle.to_radians();
            let radius = JITTER_RADIUS * (1.0 + (position / RING_SIZE) as f64);

            let record = &mut records[index];
            record.latitude += radius * angle.cos();
            record.longitude += radius * angle.sin();
        }
    }

    records
}
