//! Initial coverage plan: one rectangular region and one sweep route per
//! drone.

use sp_core::{BASE, DroneId, Point};
use sp_field::AnomalyField;

/// A half-open cell rectangle `[x0, x1) × [y0, y1)`.  May be empty when
/// there are more region slots than cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub fn cell_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.x1 - self.x0) * (self.y1 - self.y0)
        }
    }
}

/// Regions and routes for the whole fleet, indexed by `DroneId`.
#[derive(Clone, Debug, PartialEq)]
pub struct CoveragePlan {
    columns: usize,
    regions: Vec<Region>,
    routes:  Vec<Vec<Point>>,
}

impl CoveragePlan {
    /// Partition `field` among `drone_count` drones.
    ///
    /// `cols = ⌈√N⌉`; a region is `width / cols` by `height / cols` cells.
    /// Drone `i` takes row `i / cols`, column `i % cols`, clipped to the
    /// grid.  Forbidden cells are left out of the route; the final waypoint
    /// is always [`BASE`].
    pub fn build(field: &AnomalyField, drone_count: usize) -> Self {
        let columns = region_columns(drone_count);
        let (width, height) = (field.width(), field.height());
        let (cell_w, cell_h) = if columns == 0 {
            (0, 0)
        } else {
            (width / columns, height / columns)
        };

        let mut regions = Vec::with_capacity(drone_count);
        let mut routes = Vec::with_capacity(drone_count);
        for i in 0..drone_count {
            let (row, col) = (i / columns, i % columns);
            let x0 = (col * cell_w).min(width);
            let y0 = (row * cell_h).min(height);
            let region = Region {
                x0,
                y0,
                x1: (x0 + cell_w).min(width),
                y1: (y0 + cell_h).min(height),
            };
            routes.push(sweep(region, field));
            regions.push(region);
        }

        Self { columns, regions, routes }
    }

    /// Number of region columns (`⌈√N⌉`, 0 for an empty fleet).
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn region(&self, drone: DroneId) -> Option<&Region> {
        self.regions.get(drone.index())
    }

    /// The sweep route for `drone`, ending at base.
    pub fn route(&self, drone: DroneId) -> Option<&[Point]> {
        self.routes.get(drone.index()).map(Vec::as_slice)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Overwrite the route held for `drone`.  Ids outside the plan are
    /// ignored.
    pub fn set_route(&mut self, drone: DroneId, route: Vec<Point>) {
        if let Some(slot) = self.routes.get_mut(drone.index()) {
            *slot = route;
        }
    }
}

/// `⌈√n⌉` without going through floating point for exact squares.
fn region_columns(n: usize) -> usize {
    let mut c = (n as f64).sqrt() as usize;
    while c * c < n {
        c += 1;
    }
    c
}

/// Boustrophedon over `region`: even rows (relative to `y0`) left to right,
/// odd rows right to left, then home.
fn sweep(region: Region, field: &AnomalyField) -> Vec<Point> {
    let mut route = Vec::with_capacity(region.cell_count() + 1);
    let span = region.x1.saturating_sub(region.x0);
    for y in region.y0..region.y1 {
        let forward = (y - region.y0) % 2 == 0;
        for i in 0..span {
            let x = if forward { region.x0 + i } else { region.x1 - 1 - i };
            if field.is_cell_traversable(x as i64, y as i64) {
                route.push(Point::new(x as f64, y as f64));
            }
        }
    }
    route.push(BASE);
    route
}
