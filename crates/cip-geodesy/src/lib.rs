//! cip-geodesy
//!
//! Inverse transverse Mercator (Gauss–Krüger) from the SWEREF 99 TM grid to
//! WGS 84 geographic coordinates, using the 4-term Krüger series.
//!
//! Pure, deterministic logic. No IO.

/// Ellipsoid and projection parameters for one grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Semi-major axis in metres.
    pub axis: f64,
    pub flattening: f64,
    /// Central meridian in degrees.
    pub central_meridian: f64,
    pub scale: f64,
    pub false_northing: f64,
    pub false_easting: f64,
}

/// SWEREF 99 TM on the GRS 80 ellipsoid.
pub const SWEREF99_TM: GridParams = GridParams {
    axis: 6_378_137.0,
    flattening: 1.0 / 298.257_222_101,
    central_meridian: 15.0,
    scale: 0.9996,
    false_northing: 0.0,
    false_easting: 500_000.0,
};

/// Converts projected grid coordinates to geographic longitude/latitude.
///
/// Series coefficients depend only on the ellipsoid and are computed once
/// at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticProjector {
    params: GridParams,
    a_roof: f64,
    delta: [f64; 4],
    a_star: f64,
    b_star: f64,
    c_star: f64,
    d_star: f64,
}

impl Default for GeodeticProjector {
    fn default() -> Self {
        Self::new(SWEREF99_TM)
    }
}

impl GeodeticProjector {
    pub fn new(params: GridParams) -> Self {
        let f = params.flattening;
        let e2 = f * (2.0 - f);
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;

        let a_roof = params.axis / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0);

        let delta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0,
            4397.0 * n4 / 161_280.0,
        ];

        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let e8 = e6 * e2;

        Self {
            params,
            a_roof,
            delta,
            a_star: e2 + e4 + e6 + e8,
            b_star: -(7.0 * e4 + 17.0 * e6 + 30.0 * e8) / 6.0,
            c_star: (224.0 * e6 + 889.0 * e8) / 120.0,
            d_star: -(4279.0 * e8) / 1260.0,
        }
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    /// Project `(northing, easting)` in metres to `(longitude, latitude)` in degrees.
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        let p = &self.params;
        let k = p.scale * self.a_roof;

        let xi = (x - p.false_northing) / k;
        let eta = (y - p.false_easting) / k;

        let mut xi_prim = xi;
        let mut eta_prim = eta;
        for (j, d) in self.delta.iter().enumerate() {
            let m = 2.0 * (j as f64 + 1.0);
            xi_prim -= d * (m * xi).sin() * (m * eta).cosh();
            eta_prim -= d * (m * xi).cos() * (m * eta).sinh();
        }

        let phi_star = (xi_prim.sin() / eta_prim.cosh()).asin();
        let delta_lambda = (eta_prim.sinh() / xi_prim.cos()).atan();

        let lon = p.central_meridian.to_radians() + delta_lambda;

        let s2 = phi_star.sin().powi(2);
        let lat = phi_star
            + phi_star.sin()
                * phi_star.cos()
                * (self.a_star
                    + self.b_star * s2
                    + self.c_star * s2.powi(2)
                    + self.d_star * s2.powi(3));

        (lon.to_degrees(), lat.to_degrees())
    }
}

/// Convenience wrapper over [`SWEREF99_TM`].
pub fn sweref99tm_to_wgs84(northing: f64, easting: f64) -> (f64, f64) {
    GeodeticProjector::default().project(northing, easting)
}
