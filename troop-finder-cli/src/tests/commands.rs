//! Command runs against a temporary dataset with stubbed services.

use super::helpers::{
    HOME_ADDRESS, StubGeocoderBuilder, StubSuggesterBuilder, Workspace, sample_geocoder, utf8,
};
use super::*;
use crate::distances::{DistancesConfig, calculate_distances};
use crate::list::{ListConfig, list_troops};
use crate::recommend::{RecommendConfig, recommend_troops};
use crate::render::NO_TROOPS_FOUND;
use crate::suggest::{SuggestArgs, run_suggest_with};
use rstest::{fixture, rstest};
use troop_finder_core::{
    DistanceLimit, GeocodeError, MeetingDay, Preferences, SortColumn, SortDirection, SortState,
    TroopId,
};
use troop_finder_data::DistanceCache;
use troop_finder_scorer::{DISTANCE_PROMPT, NO_STRONG_MATCHES_MESSAGE};

#[fixture]
fn workspace() -> Workspace {
    Workspace::with_sample_dataset()
}

fn distances_config(workspace: &Workspace) -> DistancesConfig {
    DistancesConfig {
        address: HOME_ADDRESS.into(),
        data: workspace.data(),
        cache: workspace.cache(),
        nominatim_url: "http://nominatim.invalid".into(),
    }
}

fn measure(workspace: &Workspace) -> String {
    let mut out = Vec::new();
    calculate_distances(
        &distances_config(workspace),
        &StubGeocoderBuilder(sample_geocoder()),
        &mut out,
    )
    .expect("distances succeed");
    utf8(out)
}

fn list(workspace: &Workspace, search: &str, sort: Option<SortState>) -> Vec<String> {
    let config = ListConfig {
        data: workspace.data(),
        cache: workspace.cache(),
        search: search.into(),
        sort,
    };
    let mut out = Vec::new();
    list_troops(&config, &mut out).expect("list succeeds");
    utf8(out).lines().map(str::to_owned).collect()
}

fn recommend_with(workspace: &Workspace, preferences: Preferences) -> String {
    let config = RecommendConfig {
        data: workspace.data(),
        cache: workspace.cache(),
        preferences,
        top: 3,
    };
    let mut out = Vec::new();
    recommend_troops(&config, &mut out).expect("recommend succeeds");
    utf8(out)
}

#[rstest]
fn distances_are_cached_and_skips_reported(workspace: Workspace) {
    let output = measure(&workspace);
    assert_eq!(
        output,
        "Calculated distances for 2 troops from 12 Main St\nCould not locate troops: 36\n"
    );
    let cache = DistanceCache::load(&workspace.cache()).expect("cache written");
    assert_eq!(cache.home_address.as_deref(), Some(HOME_ADDRESS));
    assert!(cache.distances.contains_key(&TroopId::from("6")));
    assert!(!cache.distances.contains_key(&TroopId::from("36")));
}

#[rstest]
fn corrupt_cache_is_replaced_by_new_distances(workspace: Workspace) {
    let cache_path = workspace.cache();
    let parent = cache_path.parent().expect("cache has a parent");
    std::fs::create_dir_all(parent).expect("create cache dir");
    std::fs::write(&cache_path, "{ not json").expect("write corrupt cache");
    assert!(DistanceCache::load(&cache_path).is_err());

    assert!(measure(&workspace).starts_with("Calculated distances for 2 troops"));

    let cache = DistanceCache::load(&cache_path).expect("cache rewritten");
    assert_eq!(cache.home_address.as_deref(), Some(HOME_ADDRESS));
    assert!(cache.distances.contains_key(&TroopId::from("12")));
}

#[rstest]
fn unknown_home_address_fails_without_writing(workspace: Workspace) {
    let mut config = distances_config(&workspace);
    config.address = "Atlantis".into();
    let builder = StubGeocoderBuilder(sample_geocoder());
    let err = calculate_distances(&config, &builder, &mut std::io::sink())
        .expect_err("home not found");
    assert!(matches!(err, CliError::Distances(_)), "{err:?}");
    assert!(!workspace.cache().exists());
}

#[rstest]
fn missing_dataset_is_reported(workspace: Workspace) {
    let mut config = distances_config(&workspace);
    config.data = workspace.data().with_file_name("absent.json");
    let builder = StubGeocoderBuilder(sample_geocoder());
    let err = calculate_distances(&config, &builder, &mut std::io::sink())
        .expect_err("no dataset");
    match err {
        CliError::LoadDataset { path, .. } => assert_eq!(path, config.data),
        other => panic!("expected LoadDataset, found {other:?}"),
    }
}

#[rstest]
fn list_sorts_by_cached_distance(workspace: Workspace) {
    measure(&workspace);
    let lines = list(
        &workspace,
        "",
        Some(SortState::new(SortColumn::Distance, SortDirection::Ascending)),
    );
    let ids: Vec<&str> = lines
        .iter()
        .skip(1)
        .filter_map(|line| line.split("  ").next())
        .collect();
    assert_eq!(ids, ["Troop 6", "Troop 12", "Troop 36"]);
    assert!(lines[1].contains("6.9 mi"));
}

#[rstest]
fn list_search_narrows_rows(workspace: Workspace) {
    let lines = list(&workspace, "danville", None);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Troop 12"));
    assert_eq!(list(&workspace, "reno", None), [NO_TROOPS_FOUND]);
}

#[rstest]
fn distance_preferences_prompt_for_an_address(workspace: Workspace) {
    let prefs = Preferences::new().with_max_distance(DistanceLimit::Miles(10.0));
    assert_eq!(recommend_with(&workspace, prefs), format!("{DISTANCE_PROMPT}\n"));
}

#[rstest]
fn distance_preferences_rank_after_measuring(workspace: Workspace) {
    measure(&workspace);
    let prefs = Preferences::new().with_max_distance(DistanceLimit::Miles(10.0));
    let output = recommend_with(&workspace, prefs);
    assert!(output.starts_with("#1 Troop 6 (Match: 20 pts)\n"), "{output}");
    assert!(!output.contains("#2"));
}

#[rstest]
fn preferred_day_leads_the_recommendations(workspace: Workspace) {
    let prefs = Preferences::new().with_meeting_day(MeetingDay::Friday);
    let output = recommend_with(&workspace, prefs);
    assert!(output.starts_with("#1 Troop 36 (Match: 20 pts)\n"), "{output}");
    assert!(output.contains("   ✓ Meets on Fridays as preferred\n"));
    assert!(!output.contains("Troop 6"));
}

#[rstest]
fn weak_matches_print_the_hint(workspace: Workspace) {
    let prefs = Preferences::new().with_meeting_day(MeetingDay::Wednesday);
    assert_eq!(
        recommend_with(&workspace, prefs),
        format!("{NO_STRONG_MATCHES_MESSAGE}\n")
    );
}

fn suggest(query: &str, answer: Result<Vec<String>, GeocodeError>) -> Result<String, CliError> {
    let args = SuggestArgs {
        query: Some(query.into()),
        photon_url: Some("http://photon.invalid".into()),
    };
    let mut out = Vec::new();
    run_suggest_with(args, &StubSuggesterBuilder(answer), &mut out)?;
    Ok(utf8(out))
}

#[rstest]
fn suggestions_print_one_per_line() {
    let output = suggest(
        "2501 Crow",
        Ok(vec![
            "2501 Crow Canyon Rd, San Ramon CA 94583".into(),
            "2501 Crow Canyon Pl, San Ramon CA".into(),
        ]),
    )
    .expect("suggest succeeds");
    assert_eq!(
        output,
        "2501 Crow Canyon Rd, San Ramon CA 94583\n2501 Crow Canyon Pl, San Ramon CA\n"
    );
}

#[rstest]
#[case("ab", "Type at least 3 characters to see suggestions.\n")]
#[case("Nowhere Lane", "No matching addresses.\n")]
fn empty_suggestions_explain_why(#[case] query: &str, #[case] expected: &str) {
    assert_eq!(suggest(query, Ok(Vec::new())).expect("suggest"), expected);
}

#[rstest]
fn suggestion_failures_surface() {
    let failure = GeocodeError::Network {
        url: "http://photon.invalid/api/".into(),
        message: "connection refused".into(),
    };
    let err = suggest("2501 Crow", Err(failure.clone())).expect_err("service down");
    match err {
        CliError::Suggest(source) => assert_eq!(source, failure),
        other => panic!("expected Suggest, found {other:?}"),
    }
}
