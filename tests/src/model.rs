#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::{Mat4, Vec3};
    use std::path::{Path, PathBuf};

    use lantern::{
        material::TextureRole,
        model::{
            ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene, Model, ModelError,
            DEFAULT_COLOR,
        },
        shader::ShaderProgram,
    };

    use crate::recording::{CountingLoader, RecordingBackend, StaticImporter};

    fn fan(vertex_count: usize) -> ImportedMesh {
        ImportedMesh {
            name: format!("fan{}", vertex_count),
            positions: (0..vertex_count).map(|i| [i as f32, 0.0, 0.0]).collect(),
            normals: vec![[0.0, 1.0, 0.0]; vertex_count],
            tex_coords: None,
            indices: (1..vertex_count as u32 - 1)
                .flat_map(|i| [0, i, i + 1])
                .collect(),
            material: None,
        }
    }

    /// root -> a (mesh 0) -> c (mesh 1)
    ///      -> b (mesh 2)
    fn scene() -> ImportedScene {
        let mut meshes = vec![fan(3), fan(4), fan(5)];
        meshes[0].material = Some(0);
        meshes[1].material = Some(1);
        meshes[1].tex_coords = Some(vec![[0.25, 0.75]; 4]);

        ImportedScene {
            nodes: vec![
                ImportedNode {
                    name: "root".into(),
                    children: vec![1, 2],
                    ..Default::default()
                },
                ImportedNode {
                    name: "a".into(),
                    transform: Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)),
                    meshes: vec![0],
                    children: vec![3],
                },
                ImportedNode {
                    name: "b".into(),
                    meshes: vec![2],
                    ..Default::default()
                },
                ImportedNode {
                    name: "c".into(),
                    transform: Mat4::from_scale(Vec3::splat(2.0)),
                    meshes: vec![1],
                    ..Default::default()
                },
            ],
            meshes,
            materials: vec![
                ImportedMaterial {
                    name: "painted".into(),
                    diffuse: vec!["shared.png".into()],
                    ..Default::default()
                },
                ImportedMaterial {
                    name: "shiny".into(),
                    diffuse: vec!["shared.png".into()],
                    specular: vec!["spec.png".into()],
                    ..Default::default()
                },
            ],
            root: Some(0),
            incomplete: false,
        }
    }

    fn load(
        backend: &RecordingBackend,
        loader: &mut CountingLoader,
        scene: ImportedScene,
    ) -> (Model<RecordingBackend>, Result<usize, ModelError>) {
        let mut model = Model::new();
        let result = model.load(
            backend,
            &StaticImporter(scene),
            loader,
            Path::new("assets/scene.gltf"),
        );
        (model, result)
    }

    #[test]
    fn depth_first_order() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let (model, result) = load(&backend, &mut loader, scene());

        assert_eq!(result.unwrap(), 3);
        let vertex_counts: Vec<usize> = model.meshes().iter().map(|m| m.vertices().len()).collect();
        assert_eq!(vertex_counts, vec![3, 4, 5]);

        let shader = ShaderProgram::from_sources(&backend, "void main() {}", "void main() {}")
            .unwrap_or_else(|_| panic!());
        shader.use_program();
        model.draw(&shader);
        let index_counts: Vec<usize> = backend.draws.borrow().iter().map(|d| d.index_count).collect();
        assert_eq!(index_counts, vec![3, 6, 9]);
    }

    #[test]
    fn node_transforms_accumulate() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let (model, _) = load(&backend, &mut loader, scene());

        let meshes = model.meshes();
        let origin = |i: usize| meshes[i].transform().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(origin(0).x, 2.0, epsilon = 1e-6);
        // Parent translation, then own scale
        assert_abs_diff_eq!(origin(1).x, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(origin(2).x, 1.0, epsilon = 1e-6);
        assert_eq!(meshes[1].model_tr(), Mat4::IDENTITY);
    }

    #[test]
    fn textures_deduplicated() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let (model, _) = load(&backend, &mut loader, scene());

        assert_eq!(
            loader.requests,
            vec![
                PathBuf::from("assets/shared.png"),
                PathBuf::from("assets/spec.png")
            ]
        );
        assert_eq!(model.texture_count(), 2);

        let first = &model.meshes()[0].material().textures;
        let second = &model.meshes()[1].material().textures;
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(second[1].role, TextureRole::Specular);
    }

    #[test]
    fn first_material_is_used() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let (model, _) = load(&backend, &mut loader, scene());

        let material = model.meshes()[0].material();
        assert_eq!(material.textures.len(), 1);
        assert_eq!(material.textures[0].role, TextureRole::Diffuse);
        assert_eq!(material.color, Vec3::ZERO);
    }

    #[test]
    fn untextured_mesh_gets_default_color() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let (model, _) = load(&backend, &mut loader, scene());

        let material = model.meshes()[2].material();
        assert!(material.textures.is_empty());
        assert_eq!(material.color, DEFAULT_COLOR);
    }

    #[test]
    fn failed_textures_are_not_retried() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        loader.missing.insert(PathBuf::from("assets/shared.png"));
        let (model, _) = load(&backend, &mut loader, scene());

        assert_eq!(
            loader
                .requests
                .iter()
                .filter(|p| p.ends_with("shared.png"))
                .count(),
            1
        );
        let material = model.meshes()[0].material();
        assert!(material.textures.is_empty());
        assert_eq!(material.color, DEFAULT_COLOR);
        assert_eq!(model.meshes()[1].material().textures.len(), 1);
    }

    #[test]
    fn missing_attributes_default_to_zero() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let mut scene = scene();
        scene.meshes[2].normals.clear();
        let (model, _) = load(&backend, &mut loader, scene);

        let no_uvs = &model.meshes()[0];
        assert!(no_uvs.vertices().iter().all(|v| v.tex_coord == [0.0, 0.0]));
        let uvs = &model.meshes()[1];
        assert!(uvs.vertices().iter().all(|v| v.tex_coord == [0.25, 0.75]));
        let no_normals = &model.meshes()[2];
        assert!(no_normals.vertices().iter().all(|v| v.normal == [0.0; 3]));
    }

    #[test]
    fn missing_file_gives_empty_model() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();

        let model = Model::from_file(&backend, &mut loader, Path::new("no/such/model.obj"));
        assert!(model.is_empty());
        let model = Model::from_file(&backend, &mut loader, Path::new("no/such/model.gltf"));
        assert!(model.is_empty());
        let model = Model::from_file(&backend, &mut loader, Path::new("model.fbx"));
        assert_eq!(model.len(), 0);
        assert!(loader.requests.is_empty());
    }

    #[test]
    fn incomplete_scene() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let mut scene = scene();
        scene.incomplete = true;
        let (model, result) = load(&backend, &mut loader, scene);

        assert!(matches!(result, Err(ModelError::Incomplete)));
        assert!(model.is_empty());
        assert_eq!(backend.geometries_created.get(), 0);
    }

    #[test]
    fn missing_root() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();

        let mut scene = scene();
        scene.root = None;
        let (model, result) = load(&backend, &mut loader, scene);
        assert!(matches!(result, Err(ModelError::MissingRoot)));
        assert!(model.is_empty());

        let mut scene = self::scene();
        scene.root = Some(17);
        let (model, result) = load(&backend, &mut loader, scene);
        assert!(matches!(result, Err(ModelError::MissingRoot)));
        assert!(model.is_empty());
    }

    #[test]
    fn cyclic_nodes_visited_once() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let mut scene = scene();
        // c points back at the root
        scene.nodes[3].children.push(0);
        scene.nodes[2].children.push(1);
        let (model, result) = load(&backend, &mut loader, scene);

        assert_eq!(result.unwrap(), 3);
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn bad_references_are_skipped() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let mut scene = scene();
        scene.nodes[2].meshes.push(42);
        scene.nodes[2].children.push(42);
        scene.meshes[2].material = Some(9);
        scene.meshes[1].indices.push(99);
        let (model, result) = load(&backend, &mut loader, scene);

        // Mesh 1 has an out of range index and is dropped
        assert_eq!(result.unwrap(), 2);
        assert_eq!(model.meshes()[1].material().color, DEFAULT_COLOR);
    }

    /// A triangle under a translated parent and a scaled child, base color and emission
    /// share the one image.
    fn write_gltf(dir: &Path) -> PathBuf {
        const SCENE: &str = r#"{
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0] }],
            "nodes": [
                { "translation": [5.0, 0.0, 0.0], "children": [1] },
                { "scale": [2.0, 2.0, 2.0], "mesh": 0 }
            ],
            "meshes": [{
                "primitives": [{
                    "attributes": { "POSITION": 0, "TEXCOORD_0": 1 },
                    "indices": 2,
                    "material": 0
                }]
            }],
            "materials": [{
                "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } },
                "emissiveTexture": { "index": 0 }
            }],
            "textures": [{ "source": 0 }],
            "images": [{ "uri": "shared%20tex.png" }],
            "buffers": [{ "uri": "tri.bin", "byteLength": 66 }],
            "bufferViews": [
                { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
                { "buffer": 0, "byteOffset": 36, "byteLength": 24 },
                { "buffer": 0, "byteOffset": 60, "byteLength": 6 }
            ],
            "accessors": [
                { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
                { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC2" },
                { "bufferView": 2, "componentType": 5123, "count": 3, "type": "SCALAR" }
            ]
        }"#;

        let floats = [
            0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, // positions
            0.0, 0.0, 1.0, 0.0, 0.0, 0.25, // uvs
        ];
        let mut bin: Vec<u8> = floats.iter().flat_map(|f| f.to_le_bytes()).collect();
        bin.extend([0u16, 1, 2].iter().flat_map(|i| i.to_le_bytes()));

        std::fs::write(dir.join("tri.bin"), bin).unwrap();
        let path = dir.join("tri.gltf");
        std::fs::write(&path, SCENE).unwrap();
        path
    }

    #[test]
    fn gltf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gltf(dir.path());
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();

        let model = Model::from_file(&backend, &mut loader, &path);

        assert_eq!(model.len(), 1);
        let mesh = &model.meshes()[0];
        let p = mesh.transform().transform_point3(Vec3::X);
        assert_abs_diff_eq!(p.x, 7.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-6);
        let uvs: Vec<[f32; 2]> = mesh.vertices().iter().map(|v| v.tex_coord).collect();
        assert_eq!(uvs, vec![[0.0, 1.0], [1.0, 1.0], [0.0, 0.75]]);

        assert_eq!(loader.requests, vec![dir.path().join("shared tex.png")]);
        let textures = &mesh.material().textures;
        assert_eq!(textures.len(), 2);
        assert_eq!(textures[0].role, TextureRole::Diffuse);
        assert_eq!(textures[1].role, TextureRole::Emission);
        assert_eq!(textures[0].id, textures[1].id);
    }

    #[test]
    fn reload_replaces_meshes() {
        let backend = RecordingBackend::new();
        let mut loader = CountingLoader::default();
        let (mut model, _) = load(&backend, &mut loader, scene());
        assert_eq!(model.len(), 3);

        let mut smaller = scene();
        smaller.nodes[0].children = vec![2];
        let result = model.load(
            &backend,
            &StaticImporter(smaller),
            &mut loader,
            Path::new("assets/scene.gltf"),
        );
        assert_eq!(result.unwrap(), 1);
        assert_eq!(model.len(), 1);
        assert_eq!(backend.geometries_dropped.get(), 3);
    }
}
