//! Data side of the map collaborator. The renderer owns tiles and DOM; this
//! module only turns a day's item sequence into markers, popups, and a
//! fitted bounding box, rebuilt wholesale on every change.

use crate::types::item::ItineraryItem;

/// Default view center when there is nothing to fit (middle of Mauritius).
pub const ISLAND_CENTER: [f64; 2] = [-20.348404, 57.552152];

/// Fractional padding applied around the fitted bounds.
const BOUNDS_PADDING: f64 = 0.1;

/// One renderable stop: position, 1-based sequence label, category styling,
/// and a text popup.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: [f64; 2],
    pub label: usize,
    pub color: &'static str,
    pub icon: &'static str,
    pub popup: String,
}

/// Axis-aligned box around a marker set, `[latitude, longitude]` corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: [f64; 2],
    pub north_east: [f64; 2],
}

impl Bounds {
    fn fit(points: impl IntoIterator<Item = [f64; 2]>) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for [lat, lng] in points {
            bounds = Some(match bounds {
                None => Bounds {
                    south_west: [lat, lng],
                    north_east: [lat, lng],
                },
                Some(b) => Bounds {
                    south_west: [b.south_west[0].min(lat), b.south_west[1].min(lng)],
                    north_east: [b.north_east[0].max(lat), b.north_east[1].max(lng)],
                },
            });
        }
        bounds
    }

    /// Expand each side by `ratio` of the corresponding span.
    pub fn pad(self, ratio: f64) -> Self {
        let lat_pad = (self.north_east[0] - self.south_west[0]) * ratio;
        let lng_pad = (self.north_east[1] - self.south_west[1]) * ratio;
        Bounds {
            south_west: [self.south_west[0] - lat_pad, self.south_west[1] - lng_pad],
            north_east: [self.north_east[0] + lat_pad, self.north_east[1] + lng_pad],
        }
    }

    pub fn contains(&self, [lat, lng]: [f64; 2]) -> bool {
        lat >= self.south_west[0]
            && lat <= self.north_east[0]
            && lng >= self.south_west[1]
            && lng <= self.north_east[1]
    }
}

/// Complete marker layer for one day view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub markers: Vec<Marker>,
    /// None when there are no markers; renderers fall back to
    /// [`ISLAND_CENTER`].
    pub bounds: Option<Bounds>,
}

impl MapView {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a ItineraryItem>) -> Self {
        let markers: Vec<Marker> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Marker {
                position: item.coordinates,
                label: index + 1,
                color: item.category.marker_color(),
                icon: item.category.icon(),
                popup: format!(
                    "{} {}\n{}\n{}\n📍 {}",
                    item.category.icon(),
                    item.time,
                    item.title,
                    item.description,
                    item.location
                ),
            })
            .collect();

        let bounds = Bounds::fit(markers.iter().map(|marker| marker.position))
            .map(|bounds| bounds.pad(BOUNDS_PADDING));

        Self { markers, bounds }
    }
}
