//! Scene content: the path, the tube swept along it, and the scattered
//! decorations, flattened into colored line batches for the renderer.
//!
//! Everything here is built once at startup and is immutable afterwards.

pub mod decoration;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use decoration::{place_decorations, Decoration};

use crate::geometry::cube::cube;
use crate::geometry::{
    build_tube, feature_edges, wireframe_edges, Segment, TubeMesh, TubeParams,
};
use crate::options::Options;
use crate::path::CatmullRomSpline;

/// Color of every wireframe overlay.
pub const WIREFRAME_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
/// Color of the tube's feature edges.
pub const TUBE_EDGE_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Segments sharing one color.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBatch {
    /// World-space segments.
    pub segments: Vec<Segment>,
    /// Linear RGB.
    pub color: [f32; 3],
}

/// Wireframe and edge overlays for one decoration, in world space.
#[derive(Debug, Clone)]
pub struct DecorationLines {
    /// Every triangle edge of the cube.
    pub wireframe: Vec<Segment>,
    /// The cube's twelve box edges.
    pub edges: Vec<Segment>,
}

/// The static scene.
#[derive(Debug, Clone)]
pub struct Scene {
    spline: CatmullRomSpline,
    tube: TubeMesh,
    tube_wireframe: Vec<Segment>,
    tube_edges: Vec<Segment>,
    decorations: Vec<Decoration>,
    decoration_lines: Vec<DecorationLines>,
    seed: u64,
}

impl Scene {
    /// Build the scene, drawing a decoration seed from `options` or at
    /// random.
    #[must_use]
    pub fn build(options: &Options) -> Self {
        let seed = options.decorations.seed.unwrap_or_else(rand::random);
        log::info!("decoration seed {seed}");
        Self::build_with_seed(options, seed)
    }

    /// Build the scene with a fixed decoration seed.
    #[must_use]
    pub fn build_with_seed(options: &Options, seed: u64) -> Self {
        let spline = CatmullRomSpline::default();

        let tube_params = TubeParams {
            tubular_segments: options.tube.tubular_segments,
            radius: options.tube.radius,
            radial_segments: options.tube.radial_segments,
        };
        let tube = build_tube(&spline, &tube_params);
        let tube_wireframe = wireframe_edges(&tube.mesh);
        let tube_edges =
            feature_edges(&tube.mesh, options.tube.edge_threshold_deg);

        let mut rng = StdRng::seed_from_u64(seed);
        let decorations =
            place_decorations(&spline, &options.decorations, &mut rng);

        let unit = cube(options.decorations.size);
        let unit_wireframe = wireframe_edges(&unit);
        let unit_edges = feature_edges(&unit, options.tube.edge_threshold_deg);
        let decoration_lines = decorations
            .iter()
            .map(|d| {
                let m = d.transform();
                let place = |segments: &[Segment]| -> Vec<Segment> {
                    segments
                        .iter()
                        .map(|[a, b]| {
                            [m.transform_point3(*a), m.transform_point3(*b)]
                        })
                        .collect()
                };
                DecorationLines {
                    wireframe: place(&unit_wireframe),
                    edges: place(&unit_edges),
                }
            })
            .collect();

        log::debug!(
            "scene: {} tube triangles, {} wire segments, {} edge segments, {} decorations",
            tube.mesh.triangle_count(),
            tube_wireframe.len(),
            tube_edges.len(),
            decorations.len(),
        );

        Self {
            spline,
            tube,
            tube_wireframe,
            tube_edges,
            decorations,
            decoration_lines,
            seed,
        }
    }

    /// The path the camera flies along.
    #[must_use]
    pub fn spline(&self) -> &CatmullRomSpline {
        &self.spline
    }

    /// The swept tube surface.
    #[must_use]
    pub fn tube(&self) -> &TubeMesh {
        &self.tube
    }

    /// Tube wireframe overlay.
    #[must_use]
    pub fn tube_wireframe(&self) -> &[Segment] {
        &self.tube_wireframe
    }

    /// Tube feature-edge overlay.
    #[must_use]
    pub fn tube_edges(&self) -> &[Segment] {
        &self.tube_edges
    }

    /// Placed decorations.
    #[must_use]
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Seed the decorations were placed with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// All line overlays in draw order: tube wireframe, tube edges, then
    /// per decoration its wireframe followed by its hue-colored edges.
    #[must_use]
    pub fn line_batches(&self) -> Vec<LineBatch> {
        let mut batches = Vec::with_capacity(2 + self.decorations.len() * 2);
        batches.push(LineBatch {
            segments: self.tube_wireframe.clone(),
            color: WIREFRAME_COLOR,
        });
        batches.push(LineBatch {
            segments: self.tube_edges.clone(),
            color: TUBE_EDGE_COLOR,
        });
        for (decoration, lines) in
            self.decorations.iter().zip(&self.decoration_lines)
        {
            batches.push(LineBatch {
                segments: lines.wireframe.clone(),
                color: WIREFRAME_COLOR,
            });
            batches.push(LineBatch {
                segments: lines.edges.clone(),
                color: decoration.color,
            });
        }
        batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_has_55_decorations() {
        let scene = Scene::build_with_seed(&Options::default(), 1);
        assert_eq!(scene.decorations().len(), 55);
        assert_eq!(scene.seed(), 1);
    }

    #[test]
    fn seeded_scenes_are_reproducible() {
        let a = Scene::build_with_seed(&Options::default(), 99);
        let b = Scene::build_with_seed(&Options::default(), 99);
        assert_eq!(a.decorations(), b.decorations());
        assert_eq!(a.line_batches(), b.line_batches());
    }

    #[test]
    fn configured_seed_is_used() {
        let mut options = Options::default();
        options.decorations.seed = Some(5);
        let scene = Scene::build(&options);
        assert_eq!(scene.seed(), 5);
    }

    #[test]
    fn batches_follow_draw_order() {
        let scene = Scene::build_with_seed(&Options::default(), 3);
        let batches = scene.line_batches();
        assert_eq!(batches.len(), 2 + 55 * 2);
        assert_eq!(batches[0].color, WIREFRAME_COLOR);
        assert_eq!(batches[0].segments.len(), scene.tube_wireframe().len());
        assert_eq!(batches[1].color, TUBE_EDGE_COLOR);
        for (i, d) in scene.decorations().iter().enumerate() {
            let wire = &batches[2 + i * 2];
            let edges = &batches[3 + i * 2];
            assert_eq!(wire.color, WIREFRAME_COLOR);
            assert_eq!(wire.segments.len(), 18);
            assert_eq!(edges.color, d.color);
            assert_eq!(edges.segments.len(), 12);
        }
    }

    #[test]
    fn decoration_lines_surround_their_cube() {
        let scene = Scene::build_with_seed(&Options::default(), 8);
        let batches = scene.line_batches();
        let half_diagonal = 0.075 * 3f32.sqrt() / 2.0;
        for (i, d) in scene.decorations().iter().enumerate() {
            for [a, b] in &batches[3 + i * 2].segments {
                assert!(a.distance(d.position) <= half_diagonal + 1e-4);
                assert!(b.distance(d.position) <= half_diagonal + 1e-4);
            }
        }
    }
}
