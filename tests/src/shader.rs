#[cfg(test)]
mod tests {
    use glam::Vec3;
    use std::{io::Write, path::Path};

    use lantern::{
        backend::{StageKind, TextureId, UniformValue},
        lights::{GlobalLight, PointLight, SpotLight},
        material::{Material, Texture, TextureRole},
        shader::{ShaderError, ShaderProgram},
    };

    use crate::recording::RecordingBackend;

    const VS: &str = "#version 330 core\nvoid main() { gl_Position = vec4(0.0); }\n";
    const FS: &str = "#version 330 core\nout vec4 c;\nvoid main() { c = vec4(1.0); }\n";

    fn source_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", text).unwrap();
        file
    }

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn create_from_files() {
        let backend = RecordingBackend::new();
        let vs = source_file(VS);
        let fs = source_file(FS);

        let result = ShaderProgram::create(&backend, vs.path(), fs.path());
        assert!(result.is_ok());
        assert_eq!(backend.programs_linked.get(), 1);
        // Stages aren't needed once linked
        assert_eq!(backend.stages_created.get(), 2);
        assert_eq!(backend.live_stages(), 0);
    }

    #[test]
    fn empty_fragment_releases_vertex_stage() {
        let backend = RecordingBackend::new();
        let vs = source_file(VS);
        let fs = source_file("  \n\t\n");

        let result = ShaderProgram::create(&backend, vs.path(), fs.path());
        assert!(matches!(
            result,
            Err(ShaderError::EmptySource(StageKind::Fragment))
        ));
        assert_eq!(backend.stages_created.get(), 1);
        assert_eq!(backend.stages_dropped.get(), 1);
        assert_eq!(backend.programs_linked.get(), 0);
    }

    #[test]
    fn missing_file() {
        let backend = RecordingBackend::new();
        let fs = source_file(FS);

        let result = ShaderProgram::create(&backend, Path::new("no/such/shader.vs"), fs.path());
        assert!(matches!(result, Err(ShaderError::MissingFile(_))));
        assert_eq!(backend.stages_created.get(), 0);
    }

    #[test]
    fn compile_failure_names_stage() {
        let backend = RecordingBackend::new();
        backend
            .failing_stages
            .borrow_mut()
            .insert(StageKind::Fragment);

        let result = ShaderProgram::from_sources(&backend, VS, FS);
        match result {
            Err(ShaderError::Compile { stage, log }) => {
                assert_eq!(stage, StageKind::Fragment);
                assert!(log.contains("syntax error"));
            }
            _ => panic!("Expected a fragment compilation error"),
        }
        assert_eq!(backend.live_stages(), 0);
    }

    #[test]
    fn link_failure_releases_stages() {
        let backend = RecordingBackend::new();
        backend.fail_link.set(true);

        let result = ShaderProgram::from_sources(&backend, VS, FS);
        assert!(matches!(result, Err(ShaderError::Link(_))));
        assert_eq!(backend.stages_created.get(), 2);
        assert_eq!(backend.live_stages(), 0);
    }

    #[test]
    fn primitive_uniforms() {
        let backend = RecordingBackend::new();
        let shader = ShaderProgram::from_sources(&backend, VS, FS).unwrap_or_else(|_| panic!());

        shader.set_uniform("flag", &true);
        shader.set_uniform("count", &-3i32);
        shader.set_uniform("index", &7u32);
        shader.set_uniform("time", &0.5f32);
        shader.set_uniform("viewPosition", &Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(backend.uniform("flag"), Some(UniformValue::Bool(true)));
        assert_eq!(backend.uniform("count"), Some(UniformValue::Int(-3)));
        assert_eq!(backend.uniform("index"), Some(UniformValue::UInt(7)));
        assert_eq!(backend.uniform("time"), Some(UniformValue::Float(0.5)));
        assert_eq!(
            backend.uniform("viewPosition"),
            Some(UniformValue::Vec3([1.0, 2.0, 3.0]))
        );
    }

    #[test]
    fn material_uniforms() {
        let backend = RecordingBackend::new();
        let shader = ShaderProgram::from_sources(&backend, VS, FS).unwrap_or_else(|_| panic!());

        let material = Material {
            color: Vec3::new(0.1, 0.2, 0.3),
            textures: vec![
                Texture::new(TextureId(10), TextureRole::Diffuse),
                Texture::new(TextureId(11), TextureRole::Specular),
                Texture::new(TextureId(12), TextureRole::Diffuse),
            ],
            shininess: 64.0,
        };
        shader.set_uniform("material", &material);

        let textures: Vec<(String, UniformValue)> = backend
            .uniforms
            .borrow()
            .iter()
            .filter(|(_, v)| matches!(v, UniformValue::Texture(_)))
            .cloned()
            .collect();
        assert_eq!(
            textures,
            vec![
                (
                    "material.diffuse[0]".to_string(),
                    UniformValue::Texture(TextureId(10))
                ),
                (
                    "material.specular[0]".to_string(),
                    UniformValue::Texture(TextureId(11))
                ),
                (
                    "material.diffuse[1]".to_string(),
                    UniformValue::Texture(TextureId(12))
                ),
            ]
        );

        assert_eq!(
            backend.uniform("material.diffuseTexturesNumber"),
            Some(UniformValue::Int(2))
        );
        assert_eq!(
            backend.uniform("material.specularTexturesNumber"),
            Some(UniformValue::Int(1))
        );
        assert_eq!(
            backend.uniform("material.emissionTexturesNumber"),
            Some(UniformValue::Int(0))
        );
        assert_eq!(
            backend.uniform("material.shininess"),
            Some(UniformValue::Float(64.0))
        );
        assert_eq!(
            backend.uniform("material.color"),
            Some(UniformValue::Vec3([0.1, 0.2, 0.3]))
        );
        assert_eq!(backend.uniforms.borrow().len(), 8);
    }

    #[test]
    fn light_uniforms() {
        let backend = RecordingBackend::new();
        let shader = ShaderProgram::from_sources(&backend, VS, FS).unwrap_or_else(|_| panic!());

        shader.set_uniform("globalLight", &GlobalLight::default());
        assert_eq!(
            sorted(backend.uniform_names()),
            vec![
                "globalLight.ambientIntensity",
                "globalLight.color",
                "globalLight.diffuseIntensity",
                "globalLight.position",
                "globalLight.specularIntensity",
            ]
        );
        backend.clear_log();

        shader.set_uniform("pointlights[2]", &PointLight::default());
        assert_eq!(
            sorted(backend.uniform_names()),
            vec![
                "pointlights[2].ambientIntensity",
                "pointlights[2].color",
                "pointlights[2].constant",
                "pointlights[2].diffuseIntensity",
                "pointlights[2].linear",
                "pointlights[2].position",
                "pointlights[2].quadratic",
                "pointlights[2].specularIntensity",
            ]
        );
        assert_eq!(
            backend.uniform("pointlights[2].linear"),
            Some(UniformValue::Float(0.09))
        );
        backend.clear_log();

        shader.set_uniform("spotLight", &SpotLight::default());
        assert_eq!(
            sorted(backend.uniform_names()),
            vec![
                "spotLight.ambientIntensity",
                "spotLight.color",
                "spotLight.constant",
                "spotLight.cutOff",
                "spotLight.diffuseIntensity",
                "spotLight.direction",
                "spotLight.linear",
                "spotLight.outerCutOff",
                "spotLight.position",
                "spotLight.quadratic",
                "spotLight.specularIntensity",
            ]
        );
    }
}
