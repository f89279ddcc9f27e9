//! Property-based tests for solid mesh generation.
//!
//! Random valid height fields must always produce closed, manifold,
//! outward-oriented meshes with the exact vertex and triangle counts.

use proptest::prelude::*;
use relief_field::ScalarField;
use relief_mesh::{solid_from_field, solid_triangle_count, solid_vertex_count, EdgeMap};

/// Generate a random valid thickness field (all samples positive).
fn arb_field() -> impl Strategy<Value = ScalarField> {
    (2usize..10, 2usize..10).prop_flat_map(|(h, w)| {
        prop::collection::vec(0.1f32..5.0, h * w)
            .prop_map(move |data| ScalarField::from_raw(h, w, data).unwrap())
    })
}

proptest! {
    #[test]
    fn proptest_counts_match_closed_form(field in arb_field(), scale in 0.05f64..2.0) {
        let mesh = solid_from_field(&field, scale).unwrap();
        prop_assert_eq!(
            mesh.vertex_count(),
            solid_vertex_count(field.height(), field.width())
        );
        prop_assert_eq!(
            mesh.face_count(),
            solid_triangle_count(field.height(), field.width())
        );
    }

    #[test]
    fn proptest_mesh_is_closed_manifold(field in arb_field(), scale in 0.05f64..2.0) {
        let mesh = solid_from_field(&field, scale).unwrap();
        let edges = EdgeMap::build(&mesh.faces);
        prop_assert!(edges.is_closed_manifold());
        prop_assert_eq!(edges.boundary_edge_count(), 0);
        prop_assert_eq!(edges.non_manifold_edge_count(), 0);
    }

    #[test]
    fn proptest_orientation_is_outward(field in arb_field(), scale in 0.05f64..2.0) {
        let mesh = solid_from_field(&field, scale).unwrap();
        let volume = mesh.signed_volume();
        prop_assert!(volume > 0.0, "signed volume {} not positive", volume);

        // Volume is bounded by the flat footprint at min and max thickness.
        let (min, max) = field.min_max().unwrap();
        let footprint =
            (field.width() - 1) as f64 * scale * ((field.height() - 1) as f64 * scale);
        prop_assert!(volume >= footprint * min as f64 - 1e-6);
        prop_assert!(volume <= footprint * max as f64 + 1e-6);
    }

    #[test]
    fn proptest_triangles_are_non_degenerate(field in arb_field(), scale in 0.05f64..2.0) {
        let mesh = solid_from_field(&field, scale).unwrap();
        for &[a, b, c] in &mesh.faces {
            prop_assert!(a != b && b != c && a != c);
        }
    }
}
