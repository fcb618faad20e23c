//! ScenarioCatalog tests

#[cfg(test)]
mod tests {
    use executes::{
        scenario::ScenarioCatalog,
        spawns::{MapSpawns, MemorySpawnSource, SpawnStore},
        types::{Angle, Bombsite, NewSpawn, Spawn, SpawnType, Team, Vec3},
        ExecutesError,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spawn(name: &str, team: Team) -> Spawn {
        Spawn::new(name, Vec3::zero(), Angle::new(0.0, 0.0, 0.0), team, SpawnType::Normal)
    }

    fn store_with(map: &str, spawns: MapSpawns) -> SpawnStore {
        let source = MemorySpawnSource::new().with_map(map, spawns);
        let mut store = SpawnStore::new();
        store.load(&source, map);
        store
    }

    /// One attacker and one defender at each listed site.
    fn full_sites(sites: &[Bombsite]) -> MapSpawns {
        let mut spawns = MapSpawns::default();
        for &site in sites {
            spawns.push(site, spawn(&format!("{}-t", site), Team::Attacker));
            spawns.push(site, spawn(&format!("{}-ct", site), Team::Defender));
        }
        spawns
    }

    // -----------------------------------------------------------------------
    // Derivation
    // -----------------------------------------------------------------------

    #[test]
    fn both_sites_covered_yields_two_scenarios() {
        let store = store_with("de_dust2", full_sites(&Bombsite::ALL));
        let scenarios = ScenarioCatalog::build_from_spawns(&store);

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].bombsite, Bombsite::A);
        assert_eq!(scenarios[1].bombsite, Bombsite::B);
        for scenario in &scenarios {
            assert!(scenario.is_eligible());
            assert!(scenario
                .attackers
                .iter()
                .all(|s| s.team() == Team::Attacker));
            assert!(scenario
                .defenders
                .iter()
                .all(|s| s.team() == Team::Defender));
        }
    }

    #[test]
    fn site_missing_a_team_is_not_eligible() {
        let mut spawns = full_sites(&[Bombsite::A]);
        spawns.push(Bombsite::B, spawn("b-t-only", Team::Attacker));
        let store = store_with("de_overpass", spawns);

        let scenarios = ScenarioCatalog::build_from_spawns(&store);
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].bombsite, Bombsite::A);
    }

    #[test]
    fn empty_store_yields_no_scenarios() {
        assert!(ScenarioCatalog::build_from_spawns(&SpawnStore::new()).is_empty());
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    #[test]
    fn current_is_none_before_first_pick() {
        let mut catalog = ScenarioCatalog::new();
        catalog.rebuild(&store_with("de_dust2", full_sites(&Bombsite::ALL)));
        assert!(catalog.current().is_none());
    }

    #[test]
    fn pick_never_fails_when_every_site_is_covered() {
        let store = store_with("de_dust2", full_sites(&Bombsite::ALL));
        let mut catalog = ScenarioCatalog::new();
        catalog.rebuild(&store);

        for seed in 0..64u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = catalog.pick_random(&mut rng).unwrap().clone();
            assert_eq!(catalog.current(), Some(&picked));
        }
    }

    #[test]
    fn pick_reaches_every_eligible_scenario() {
        let store = store_with("de_dust2", full_sites(&Bombsite::ALL));
        let mut catalog = ScenarioCatalog::new();
        catalog.rebuild(&store);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen_a = 0;
        let mut seen_b = 0;
        for _ in 0..200 {
            match catalog.pick_random(&mut rng).unwrap().bombsite {
                Bombsite::A => seen_a += 1,
                Bombsite::B => seen_b += 1,
            }
        }
        assert!(seen_a > 50 && seen_b > 50, "A={} B={}", seen_a, seen_b);
    }

    #[test]
    fn same_seed_same_pick_sequence() {
        let store = store_with("de_dust2", full_sites(&Bombsite::ALL));
        let mut first = ScenarioCatalog::new();
        let mut second = ScenarioCatalog::new();
        first.rebuild(&store);
        second.rebuild(&store);

        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..20 {
            let a = first.pick_random(&mut rng_a).unwrap().bombsite;
            let b = second.pick_random(&mut rng_b).unwrap().bombsite;
            assert_eq!(a, b);
        }
    }

    #[test]
    fn zero_spawns_fails_and_leaves_current_unchanged() {
        let mut catalog = ScenarioCatalog::new();
        catalog.rebuild(&SpawnStore::new());

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            catalog.pick_random(&mut rng),
            Err(ExecutesError::NoScenarioAvailable)
        ));
        assert!(catalog.current().is_none());
    }

    #[test]
    fn failed_pick_keeps_previous_round_scenario() {
        let mut store = store_with("de_dust2", full_sites(&[Bombsite::B]));
        let mut catalog = ScenarioCatalog::new();
        catalog.rebuild(&store);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        catalog.pick_random(&mut rng).unwrap();
        let before = catalog.current().cloned();

        // Spawns vanish without a map change: refresh keeps the pick.
        store.clear();
        catalog.refresh(&store);
        assert!(catalog.pick_random(&mut rng).is_err());
        assert_eq!(catalog.current().cloned(), before);
        assert_eq!(before.map(|s| s.bombsite), Some(Bombsite::B));
    }

    #[test]
    fn rebuild_for_new_map_drops_current() {
        let store = store_with("de_dust2", full_sites(&Bombsite::ALL));
        let mut catalog = ScenarioCatalog::new();
        catalog.rebuild(&store);
        catalog
            .pick_random(&mut ChaCha8Rng::seed_from_u64(5))
            .unwrap();

        catalog.rebuild(&store_with("de_train", full_sites(&[Bombsite::A])));
        assert!(catalog.current().is_none());
        assert_eq!(catalog.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Added spawns become selectable
    // -----------------------------------------------------------------------

    #[test]
    fn added_spawns_for_new_site_become_selectable_after_refresh() {
        let mut store = store_with("de_dust2", full_sites(&[Bombsite::A]));
        let mut catalog = ScenarioCatalog::new();
        catalog.rebuild(&store);
        assert_eq!(catalog.len(), 1);

        for team in ["T", "CT"] {
            store
                .add_spawn(NewSpawn {
                    team: team.into(),
                    bombsite: "B".into(),
                    position: Some(Vec3::new(1.0, 2.0, 3.0)),
                    angle: Some(Angle::new(0.0, 45.0, 0.0)),
                    ..Default::default()
                })
                .unwrap();
        }
        catalog.refresh(&store);

        assert_eq!(catalog.len(), 2);
        assert!(catalog
            .scenarios()
            .iter()
            .any(|s| s.bombsite == Bombsite::B));
    }
}
