#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Instant;

    use test_case::test_case;

    use formwork_rs::entities::UsageType;
    use formwork_rs::io::export::export_report;
    use formwork_rs::io::import::Importer;
    use formwork_rs::util::assertions;
    use formwork_rs::FormworkError;
    use slab_builder::builder::SlabBuilder;
    use slab_builder::config::BuilderConfig;
    use slab_builder::io;
    use slab_builder::io::output::BuildOutput;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test_case("../assets/square.json", None; "square")]
    #[test_case("../assets/square.json", Some(2); "square_own_pool")]
    #[test_case("../assets/hall.json", None; "hall")]
    #[test_case("../assets/hall.json", Some(3); "hall_own_pool")]
    fn test_request(request_path: &str, mesh_threads: Option<usize>) {
        init();
        let ext_request = io::read_build_request(Path::new(request_path)).unwrap();
        let request = Importer::default().import_request(&ext_request).unwrap();
        assert!(assertions::environment_is_consistent(&request.environment));

        let config = BuilderConfig {
            mesh_threads,
            ..BuilderConfig::default()
        };
        let mut builder = SlabBuilder::new(request, config);
        let (result, meshes) = builder.build().unwrap();

        assert!(assertions::meshes_are_finite(&meshes));
        assert!(assertions::result_matches_host(&result, &builder.world));
        assert!(!result.placed.is_empty());
        assert_eq!(builder.world.len(), result.placed.len());

        // every cast point is either filled or reported
        let casts = result.placed_of(UsageType::Form).count()
            + result.collisions_of(UsageType::Form).count();
        assert_eq!(casts, meshes.casts.len());

        let output = BuildOutput {
            report: export_report(&ext_request.name, &result, Some(&meshes), Instant::now()),
            request: ext_request,
            config,
        };
        let json = serde_json::to_string(&output).unwrap();
        let back: BuildOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.report.placed.len(), result.placed.len());
        assert_eq!(back.config, config);
    }

    #[test_case("../assets/square.json"; "square")]
    #[test_case("../assets/hall.json"; "hall")]
    fn builds_are_deterministic(request_path: &str) {
        init();
        let ext_request = io::read_build_request(Path::new(request_path)).unwrap();
        let run = || {
            let request = Importer::default().import_request(&ext_request).unwrap();
            let mut builder = SlabBuilder::new(request, BuilderConfig::default());
            builder.build().unwrap()
        };
        let (first, first_meshes) = run();
        let (second, second_meshes) = run();
        assert_eq!(first_meshes, second_meshes);
        assert_eq!(first.placed.len(), second.placed.len());
        assert!(
            first
                .placed
                .iter()
                .zip(second.placed.iter())
                .all(|(a, b)| a.part_id == b.part_id && a.position() == b.position())
        );
    }

    #[test]
    fn cancelled_build() {
        init();
        let ext_request = io::read_build_request(Path::new("../assets/square.json")).unwrap();
        let request = Importer::default().import_request(&ext_request).unwrap();
        let mut builder = SlabBuilder::new(request, BuilderConfig::default());
        builder.cancel_token().cancel();

        let err = builder.build().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormworkError>(),
            Some(FormworkError::Cancelled)
        ));
        assert!(builder.world.is_empty());
    }

    #[test]
    fn config_defaults() {
        let config: BuilderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BuilderConfig::default());

        let file = std::fs::read_to_string("../assets/config.json").unwrap();
        let config: BuilderConfig = serde_json::from_str(&file).unwrap();
        assert_eq!(config.mesh_threads, Some(4));
        assert!(config.export_meshes);
    }
}
