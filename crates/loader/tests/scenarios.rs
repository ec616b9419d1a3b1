use objcore::{Index, ParseError};
use objloader::{
    LoadConfig, MaterialMap, NoMaterials, TriangulationMethod, load_obj_from_str,
    load_obj_with_mtl,
};

const CUBE: &str = "\
# unit cube, quads
mtllib cube.mtl
o cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
vn 0 0 -1
vn 0 0 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
usemtl paint
s 1
f 1/1/1 4/4/1 3/3/1 2/2/1
f 5/1/2 6/2/2 7/3/2 8/4/2
g sides
usemtl metal
f 1 2 6 5
f -5 -1 -2 -6
f 2 3 7 6
f 4 1 5 8
";

const CUBE_MTL: &str = "\
newmtl paint
Ka 0.1 0.1 0.1
Kd 1.0 0.5 0.25
Ns 32
map_Kd -s 2 2 1 paint.png
newmtl metal
Kd 0.8 0.8 0.8
Pm 1.0
d 0.5
";

fn cube() -> objloader::LoadResult {
    let resolver = MaterialMap::new().with("cube.mtl", CUBE_MTL);
    load_obj_from_str(CUBE, &resolver, &LoadConfig::default())
}

#[test]
fn attribute_pools_keep_their_strides() {
    let result = cube();
    assert!(result.success, "{}", result.diagnostics.error_log());
    assert!(result.diagnostics.is_empty(), "{}", result.diagnostics.warning_log());
    assert_eq!(result.attrib.vertices.len() % 3, 0);
    assert_eq!(result.attrib.normals.len() % 3, 0);
    assert_eq!(result.attrib.texcoords.len() % 2, 0);
    assert_eq!(result.attrib.vertex_count(), 8);
    assert_eq!(result.attrib.normal_count(), 2);
    assert_eq!(result.attrib.texcoord_count(), 4);
    assert!(result.attrib.is_well_formed());
}

#[test]
fn triangulated_meshes_have_three_corners_per_face() {
    let result = cube();
    assert_eq!(result.shapes.len(), 2);
    for shape in &result.shapes {
        let mesh = &shape.mesh;
        assert!(mesh.num_face_vertices.iter().all(|&n| n == 3));
        let corners: u32 = mesh.num_face_vertices.iter().sum();
        assert_eq!(corners as usize, mesh.indices.len());
        assert_eq!(mesh.face_count() * 3, mesh.indices.len());
        assert_eq!(mesh.material_ids.len(), mesh.face_count());
        assert_eq!(mesh.smoothing_group_ids.len(), mesh.face_count());
    }
    assert_eq!(result.shapes[0].name, "cube");
    assert_eq!(result.shapes[0].mesh.face_count(), 4);
    assert_eq!(result.shapes[1].name, "sides");
    assert_eq!(result.shapes[1].mesh.face_count(), 8);
}

#[test]
fn shapes_share_one_vertex_pool() {
    let result = cube();
    let first = result.shapes[0].mesh.indices[0];
    let second = result.shapes[1].mesh.indices[0];
    assert_eq!(first.vertex_index, 0);
    assert_eq!(second.vertex_index, 0);
}

#[test]
fn relative_indices_match_absolute_ones() {
    let result = cube();
    let sides = &result.shapes[1].mesh;
    let face: Vec<Vec<i32>> = sides
        .faces()
        .map(|f| f.iter().map(|i| i.vertex_index).collect())
        .collect();
    // `f -5 -1 -2 -6` after 8 vertices is `f 4 8 7 3`.
    assert_eq!(face[2], vec![3, 7, 6]);
    assert_eq!(face[3], vec![3, 6, 2]);

    let literal = load_obj_from_str(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        &NoMaterials,
        &LoadConfig::default(),
    );
    let relative = load_obj_from_str(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n",
        &NoMaterials,
        &LoadConfig::default(),
    );
    assert_eq!(literal.shapes, relative.shapes);
}

#[test]
fn materials_round_trip_through_mtllib() {
    let result = cube();
    assert_eq!(result.materials.len(), 2);

    let paint = &result.materials[0];
    assert_eq!(paint.name, "paint");
    let expected = [1.0, 0.5, 0.25];
    for (got, want) in paint.diffuse.iter().zip(expected) {
        assert!((got - want).abs() < 1e-6);
    }
    assert_eq!(paint.shininess, 32.0);
    assert_eq!(paint.diffuse_texname, "paint.png");
    assert_eq!(paint.diffuse_texopt.scale, [2.0, 2.0, 1.0]);

    let metal = &result.materials[1];
    assert_eq!(metal.metallic, 1.0);
    assert_eq!(metal.dissolve, 0.5);

    assert!(result.shapes[0].mesh.material_ids.iter().all(|&id| id == 0));
    assert!(result.shapes[1].mesh.material_ids.iter().all(|&id| id == 1));
    assert!(result.shapes[0].mesh.smoothing_group_ids.iter().all(|&s| s == 1));
}

#[test]
fn unknown_usemtl_keeps_active_material() {
    let obj = "mtllib m.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\n\
               usemtl only\nf 1 2 3\nusemtl ghost\nf 1 2 3\n";
    let result = load_obj_with_mtl(obj, "newmtl only\nKd 1 1 1\n", &LoadConfig::default());
    assert!(result.success);
    assert_eq!(result.shapes[0].mesh.material_ids, vec![0, 0]);
    assert_eq!(result.warnings().len(), 1);
    let warning = &result.warnings()[0];
    assert_eq!(warning.line, 7);
    assert_eq!(warning.text, "usemtl ghost");
    assert!(matches!(
        &warning.error,
        ParseError::UnresolvedMaterialName { name } if name == "ghost"
    ));
}

#[test]
fn two_corner_face_is_rejected() {
    let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2\nf 1 2 3\n";

    let lenient = load_obj_from_str(obj, &NoMaterials, &LoadConfig::default());
    assert!(lenient.success);
    assert_eq!(lenient.shapes[0].mesh.num_face_vertices, vec![3]);
    assert!(matches!(
        lenient.warnings()[0].error,
        ParseError::MalformedFaceDirective { directive: "f", required: 3, found: 2 }
    ));

    let strict = load_obj_from_str(obj, &NoMaterials, &LoadConfig::default().with_strict(true));
    assert!(!strict.success);
    assert!(strict.shapes[0].mesh.is_empty());
    assert_eq!(strict.errors()[0].line, 4);
    // Vertices read before the failure are still returned.
    assert_eq!(strict.attrib.vertex_count(), 3);
}

#[test]
fn concrete_triangle() {
    let result = load_obj_from_str(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        &NoMaterials,
        &LoadConfig::default(),
    );
    assert_eq!(
        result.attrib.vertices,
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
    );
    assert_eq!(result.shapes.len(), 1);
    let mesh = &result.shapes[0].mesh;
    assert_eq!(mesh.num_face_vertices, vec![3]);
    assert_eq!(
        mesh.indices,
        vec![
            Index::new(0, -1, -1),
            Index::new(1, -1, -1),
            Index::new(2, -1, -1)
        ]
    );
    assert_eq!(mesh.material_ids, vec![-1]);
}

#[test]
fn convex_quad_fans_from_corner_zero() {
    let quad = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
    let result = load_obj_from_str(quad, &NoMaterials, &LoadConfig::default());
    let faces: Vec<_> = result.shapes[0].mesh.faces().collect();
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0][0], faces[1][0]);
    assert_eq!(faces[0][0].vertex_index, 0);

    let clipped = load_obj_from_str(
        quad,
        &NoMaterials,
        &LoadConfig::default().with_triangulation(TriangulationMethod::EarClip),
    );
    assert_eq!(clipped.shapes[0].mesh.face_count(), 2);

    let raw = load_obj_from_str(quad, &NoMaterials, &LoadConfig::default().with_triangulate(false));
    assert_eq!(raw.shapes[0].mesh.num_face_vertices, vec![4]);
}

#[test]
fn missing_library_is_a_warning() {
    let result = load_obj_from_str(
        "mtllib absent.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl x\nf 1 2 3\n",
        &NoMaterials,
        &LoadConfig::default(),
    );
    assert!(result.success);
    assert!(result.materials.is_empty());
    assert_eq!(result.shapes[0].mesh.material_ids, vec![-1]);
    assert_eq!(result.warnings().len(), 2);
}

#[test]
fn out_of_range_face_is_dropped() {
    let result = load_obj_from_str(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\nf 1 2 3\n",
        &NoMaterials,
        &LoadConfig::default(),
    );
    assert!(result.success);
    assert_eq!(result.shapes[0].mesh.face_count(), 1);
    assert!(matches!(
        result.warnings()[0].error,
        ParseError::IndexOutOfRange { attribute: "vertex", raw: 4, available: 3 }
    ));
}

#[test]
fn parsing_is_deterministic() {
    assert_eq!(cube(), cube());
}

#[test]
fn continuation_lines_and_comments() {
    let result = load_obj_from_str(
        "v 0 0 0 # origin\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 \\\n  4 3\n",
        &NoMaterials,
        &LoadConfig::default(),
    );
    assert!(result.success);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.shapes[0].mesh.face_count(), 2);
}

#[test]
fn concurrent_parses_do_not_interfere() {
    let expected = cube();
    let handles: Vec<_> = (0..4).map(|_| std::thread::spawn(cube)).collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn classic_mac_line_endings() {
    let result = load_obj_from_str(
        "v 0 0 0\rv 1 0 0\rv 0 1 0\rf 1 2 3\r",
        &NoMaterials,
        &LoadConfig::default(),
    );
    assert!(result.diagnostics.is_empty(), "{}", result.diagnostics.warning_log());
    assert_eq!(result.attrib.vertex_count(), 3);
    assert_eq!(result.shapes[0].mesh.face_count(), 1);
}
