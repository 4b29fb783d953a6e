#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use formwork_rs::entities::{
        Catalog, CatalogRepository, CollisionReason, Environment, ObstacleKind, Part, PlacedKey,
        PlacedPart, Polyline, SlabProperties, SlabSettings, UsageType,
    };
    use formwork_rs::geometry::DTransformation;
    use formwork_rs::geometry::geo_traits::CollidesWith;
    use formwork_rs::geometry::primitives::Point;
    use formwork_rs::mesh::{Orientation, generate_meshes};
    use formwork_rs::placement::strategy::{Cell, CellOutcome, resolve_cell};
    use formwork_rs::placement::{GeometryHost, HostError, World, can_place, run_placement};
    use formwork_rs::util::CancelToken;
    use formwork_rs::FormworkError;

    const CAST: usize = 0;
    const LP: usize = 1;
    const LD: usize = 2;
    const HEAD: usize = 3;
    const END: usize = 4;

    fn init_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    fn parts() -> Vec<Part> {
        vec![
            Part::new(CAST, "cast 2x2", 2.0, 2.0, UsageType::Form, 1),
            Part::new(LP, "LP 1", 1.0, 1.0, UsageType::Spacer, 1),
            Part::new(LD, "LD 4", 4.0, 1.0, UsageType::PrimarySpacer, 1),
            Part::new(HEAD, "head 1", 1.0, 1.0, UsageType::Head, 1),
            Part::new(END, "end 0.5", 0.5, 1.0, UsageType::EndSpacer, 1),
        ]
    }

    fn settings(orientation: Orientation) -> SlabSettings {
        SlabSettings {
            cast: Some(CAST),
            primary_spacer: LD,
            field_spacer: LP,
            start_spacer: None,
            modulation: 1,
            orientation,
            use_secondary_spacers: false,
            use_end_spacers: false,
            use_start_spacer: false,
            only_formwork: false,
            outline_clearance: 0.0,
            spacing_field_spacers: 0.0,
            spacing_field_primary: 0.0,
            start_point: None,
        }
    }

    fn square(size: f64) -> Polyline {
        Polyline::closed(vec![
            Point(0.0, 0.0),
            Point(size, 0.0),
            Point(size, size),
            Point(0.0, size),
        ])
    }

    fn run(
        env: &Environment,
        catalog: &Catalog,
        settings: &SlabSettings,
        host: &mut dyn GeometryHost,
    ) -> formwork_rs::Result<formwork_rs::entities::PlacementResult> {
        let props = SlabProperties::new(settings, catalog, env)?;
        let cancel = CancelToken::new();
        let meshes = generate_meshes(&props, env, &cancel)?;
        run_placement(&meshes, &props, env, catalog, host, &cancel)
    }

    #[test_case(Orientation::Vertical; "vertical")]
    #[test_case(Orientation::Horizontal; "horizontal")]
    fn square_scenario(orientation: Orientation) {
        init_logger();
        let env = Environment::new(square(10.0), vec![], vec![]).unwrap();
        let catalog = Catalog::new(parts()).unwrap();
        let mut world = World::new();
        let result = run(&env, &catalog, &settings(orientation), &mut world).unwrap();

        assert!(result.collisions.is_empty(), "{:?}", result.collisions);
        assert_eq!(result.placed.len(), 20 + 10 + 10 + 20);
        assert_eq!(world.len(), result.placed.len());
        assert_eq!(result.summary()[&UsageType::Form], (20, 0));
    }

    #[test]
    fn hole_scenario() {
        init_logger();
        let hole = Polyline::closed(vec![
            Point(4.0, 4.0),
            Point(7.0, 4.0),
            Point(7.0, 7.0),
            Point(4.0, 7.0),
        ]);
        let env = Environment::new(square(10.0), vec![], vec![hole]).unwrap();
        let catalog = Catalog::new(parts()).unwrap();
        let settings = settings(Orientation::Vertical);
        let props = SlabProperties::new(&settings, &catalog, &env).unwrap();
        let meshes = generate_meshes(&props, &env, &CancelToken::new()).unwrap();

        let hole_shape = &env.holes()[0];
        let world = World::new();
        let sweep = props.sweep;
        let checks = [
            (&meshes.casts, CAST, sweep.advance_rotation),
            (&meshes.primary_spacers, LD, sweep.advance_rotation),
            (&meshes.field_spacers, LP, sweep.row_rotation),
            (&meshes.headers, HEAD, sweep.row_rotation),
        ];
        let mut blocked = 0;
        for (points, part_id, rotation) in checks {
            let part = catalog.part(part_id).unwrap();
            for p in points {
                if part.placed_footprint(*p, rotation).collides_with(hole_shape) {
                    assert!(!can_place(&env, &world, *p, part, rotation));
                    blocked += 1;
                }
            }
        }
        assert!(blocked > 0);

        let mut world = World::new();
        let result = run_placement(&meshes, &props, &env, &catalog, &mut world, &CancelToken::new())
            .unwrap();
        assert!(!result.collisions.is_empty());
        for placed in &result.placed {
            assert!(!env.in_hole(&placed.position()));
            let part = catalog.part(placed.part_id).unwrap();
            let footprint = part.placed_footprint(placed.position(), placed.rotation_deg());
            assert!(!footprint.collides_with(hole_shape));
        }
    }

    #[test]
    fn missing_usage_type_is_reported() {
        let env = Environment::new(square(10.0), vec![], vec![]).unwrap();
        let catalog = Catalog::new(
            parts()
                .into_iter()
                .filter(|p| p.usage != UsageType::Head)
                .collect(),
        )
        .unwrap();
        let settings = settings(Orientation::Vertical);
        let props = SlabProperties::new(&settings, &catalog, &env).unwrap();
        let meshes = generate_meshes(&props, &env, &CancelToken::new()).unwrap();
        let mut world = World::new();
        let result = run_placement(&meshes, &props, &env, &catalog, &mut world, &CancelToken::new())
            .unwrap();

        assert_eq!(result.placed_of(UsageType::Head).count(), 0);
        let collisions = result.collisions_of(UsageType::Head).collect::<Vec<_>>();
        assert_eq!(collisions.len(), meshes.headers.len());
        assert!(
            collisions
                .iter()
                .zip(&meshes.headers)
                .all(|(c, p)| c.position == *p && c.reason == CollisionReason::NoMainPart)
        );
    }

    fn lp_catalog(widths: &[f64]) -> Catalog {
        let parts = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| Part::new(i, format!("LP {w}"), w, 1.0, UsageType::Spacer, 1))
            .collect();
        Catalog::new(parts).unwrap()
    }

    fn resolve(
        env: &Environment,
        catalog: &Catalog,
        host: &mut dyn GeometryHost,
        point: Point,
    ) -> CellOutcome {
        let main = catalog.part(0).unwrap();
        let fallbacks = catalog.descending_chain(main, UsageType::Spacer);
        let cell = Cell {
            point,
            rotation: 0.0,
            width_axis: Point(1.0, 0.0),
            main,
            fallbacks: &fallbacks,
        };
        resolve_cell(env, host, &cell).unwrap()
    }

    #[test]
    fn fallback_to_smaller_part() {
        let env = Environment::new(square(10.0), vec![], vec![]).unwrap();
        let catalog = lp_catalog(&[4.0, 3.0, 2.0]);
        let mut world = World::new();

        //the 4 and 3 wide parts stick out of the outline
        match resolve(&env, &catalog, &mut world, Point(8.6, 5.0)) {
            CellOutcome::Placed(p) => {
                assert_eq!(p.part_id, 2);
                assert_eq!(p.position(), Point(8.6, 5.0));
            }
            CellOutcome::Exhausted => panic!("expected a fallback"),
        }
    }

    #[test]
    fn edge_escape() {
        let column = Polyline::closed(vec![
            Point(6.0, 4.0),
            Point(7.6, 4.0),
            Point(7.6, 6.0),
            Point(6.0, 6.0),
        ]);
        let env = Environment::new(square(20.0), vec![(ObstacleKind::Column, column)], vec![])
            .unwrap();
        let catalog = lp_catalog(&[4.0, 2.0]);
        let mut world = World::new();

        //both parts hit the column when centred on the point,
        //the smaller one clears it once aligned with the far end of the main part
        match resolve(&env, &catalog, &mut world, Point(8.0, 5.0)) {
            CellOutcome::Placed(p) => {
                assert_eq!(p.part_id, 1);
                assert!(approx_eq!(f64, p.position().0, 9.0));
                assert_eq!(p.mesh_point, Point(8.0, 5.0));
            }
            CellOutcome::Exhausted => panic!("expected an edge escape"),
        }
    }

    #[test]
    fn exhausted_cell() {
        let env = Environment::new(square(10.0), vec![], vec![]).unwrap();
        let catalog = lp_catalog(&[4.0, 3.0]);
        let mut world = World::new();
        let outcome = resolve(&env, &catalog, &mut world, Point(9.5, 5.0));
        assert_eq!(outcome, CellOutcome::Exhausted);
        assert!(world.is_empty());
    }

    /// Host refusing the main part, or failing for good after a number of commits
    struct ScriptedHost {
        world: World,
        rejected_part: Option<usize>,
        fatal_after: Option<usize>,
    }

    impl GeometryHost for ScriptedHost {
        fn commit(
            &mut self,
            part: &Part,
            d_transf: DTransformation,
        ) -> Result<PlacedKey, HostError> {
            if self.rejected_part == Some(part.id) {
                return Err(HostError::Rejected(format!("{} is not allowed", part.name)));
            }
            if self.fatal_after.is_some_and(|n| self.world.len() >= n) {
                return Err(HostError::Fatal("document closed".into()));
            }
            self.world.commit(part, d_transf)
        }

        fn placed(&self) -> Vec<&PlacedPart> {
            self.world.placed()
        }
    }

    #[test]
    fn rejected_commit_falls_back() {
        let env = Environment::new(square(10.0), vec![], vec![]).unwrap();
        let catalog = lp_catalog(&[2.0, 1.0]);
        let mut host = ScriptedHost {
            world: World::new(),
            rejected_part: Some(0),
            fatal_after: None,
        };
        match resolve(&env, &catalog, &mut host, Point(5.0, 5.0)) {
            CellOutcome::Placed(p) => assert_eq!(p.part_id, 1),
            CellOutcome::Exhausted => panic!("expected a fallback"),
        }
    }

    #[test]
    fn fatal_host_error_aborts() {
        let env = Environment::new(square(10.0), vec![], vec![]).unwrap();
        let catalog = Catalog::new(parts()).unwrap();
        let mut host = ScriptedHost {
            world: World::new(),
            rejected_part: None,
            fatal_after: Some(3),
        };
        let err = run(&env, &catalog, &settings(Orientation::Vertical), &mut host).unwrap_err();
        assert!(matches!(err, FormworkError::Host(_)));
        //parts committed before the failure stay
        assert_eq!(host.placed().len(), 3);
    }

    #[test]
    fn overlapping_parts_rejected_by_world() {
        let part = Part::new(0, "LP 1", 1.0, 1.0, UsageType::Spacer, 1);
        let mut world = World::new().with_overlap_rejection(true);
        let pose = Part::pose(Point(1.0, 1.0), 0.0);
        let key = world.commit(&part, pose).unwrap();
        assert_eq!(world.get(key).map(|pp| pp.position()), Some(Point(1.0, 1.0)));
        let bbox = world.footprint(key).unwrap().bbox;
        assert!(approx_eq!(f64, bbox.x_min, 0.5, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_max, 1.5, epsilon = 1e-9));
        assert!(matches!(world.commit(&part, pose), Err(HostError::Rejected(_))));
        //touching is fine
        assert!(world.commit(&part, Part::pose(Point(2.0, 1.0), 0.0)).is_ok());
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn end_pieces_fill_the_rows() {
        init_logger();
        let outline = Polyline::closed(vec![
            Point(0.0, 0.0),
            Point(10.25, 0.0),
            Point(10.25, 10.0),
            Point(0.0, 10.0),
        ]);
        let env = Environment::new(outline, vec![], vec![]).unwrap();
        let catalog = Catalog::new(parts()).unwrap();
        let mut settings = settings(Orientation::Vertical);
        settings.use_end_spacers = true;
        let mut world = World::new();
        let result = run(&env, &catalog, &settings, &mut world).unwrap();

        //per row: a field spacer from the anchor and an end spacer behind it
        let ends = result.placed_of(UsageType::EndSpacer).collect::<Vec<_>>();
        assert_eq!(ends.len(), 2);
        for end in ends {
            assert!(approx_eq!(f64, end.position().0, 9.25, epsilon = 1e-9));
        }
        assert_eq!(result.placed_of(UsageType::Spacer).count(), 2 * 9);
        assert!(result.collisions.is_empty(), "{:?}", result.collisions);
    }

    //floor with a notch [1, 3] x [0, 1] cut out of its bottom edge
    fn notched_floor() -> Environment {
        Environment::from_outline(vec![
            Point(0.0, 0.0),
            Point(1.0, 0.0),
            Point(1.0, 1.0),
            Point(3.0, 1.0),
            Point(3.0, 0.0),
            Point(6.0, 0.0),
            Point(6.0, 4.0),
            Point(0.0, 4.0),
        ])
        .unwrap()
    }

    #[test_case(Point(0.5, 0.5), false; "spans the notch")]
    #[test_case(Point(0.5, 1.5), true; "rests on the notch")]
    #[test_case(Point(1.5, 0.5), false; "pivot in the notch")]
    #[test_case(Point(3.5, 0.5), false; "leaves the floor")]
    #[test_case(Point(1.5, 2.5), true; "inside")]
    fn can_place_on_concave_outline(point: Point, expected: bool) {
        let env = notched_floor();
        let part = Part::new(LP, "LP 4", 4.0, 1.0, UsageType::Spacer, 1)
            .with_pivot(Point(0.5, 0.5));
        let world = World::new();
        assert_eq!(can_place(&env, &world, point, &part, 0.0), expected);
    }

    #[test]
    fn cancelled_before_placement() {
        let env = Environment::new(square(10.0), vec![], vec![]).unwrap();
        let catalog = Catalog::new(parts()).unwrap();
        let settings = settings(Orientation::Vertical);
        let props = SlabProperties::new(&settings, &catalog, &env).unwrap();
        let cancel = CancelToken::new();
        let meshes = generate_meshes(&props, &env, &cancel).unwrap();

        cancel.cancel();
        let mut world = World::new();
        let err = run_placement(&meshes, &props, &env, &catalog, &mut world, &cancel).unwrap_err();
        assert!(matches!(err, FormworkError::Cancelled));
        assert!(world.is_empty());
    }

    #[test]
    fn invalid_environment() {
        let open = Polyline {
            points: vec![Point(0.0, 0.0), Point(1.0, 0.0), Point(1.0, 1.0)],
            closed: false,
        };
        let err = Environment::new(open, vec![], vec![]).unwrap_err();
        assert!(matches!(err, FormworkError::Validation(_)));

        let bowtie = Polyline::closed(vec![
            Point(0.0, 0.0),
            Point(1.0, 1.0),
            Point(1.0, 0.0),
            Point(0.0, 1.0),
        ]);
        let err = Environment::new(square(10.0), vec![], vec![bowtie]).unwrap_err();
        assert!(matches!(err, FormworkError::Validation(_)));
    }
}
