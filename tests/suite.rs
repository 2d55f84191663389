// Integration suite for the listing view: pipeline properties over whole
// datasets, the state machine behind the setters, dataset loading from disk,
// and the game-list CLI end to end.
mod support;

use anyhow::Result;
use gamelist::{
    DerivedResult, Game, GameIndex, GenreFilter, ListingConfig, ListingView, PageSize, SortKey,
    ViewCommand, ViewState, compute_view, genre_options, open_listing,
};
use serde_json::Value;
use std::collections::BTreeSet;
use support::{
    game_list_command, run_command, run_with_stdin, seven_games, titles, write_dataset, write_text,
};

fn state(page_size: usize, page: usize) -> ViewState {
    ViewState {
        current_page: page,
        ..ViewState::new(PageSize::fixed(page_size).unwrap())
    }
}

fn run(dataset: &[Game], state: &ViewState) -> DerivedResult {
    compute_view(dataset, state)
}

#[test]
fn scenario_first_page_of_seven() {
    let result = run(&seven_games(), &state(6, 1));
    assert_eq!(result.visible_items.len(), 6);
    assert_eq!(result.total_pages, 2);
}

#[test]
fn scenario_second_page_of_seven() {
    let result = run(&seven_games(), &state(6, 2));
    assert_eq!(result.visible_items.len(), 1);
    assert_eq!(result.total_pages, 2);
    assert_eq!(
        titles(&result.visible_items),
        vec!["Star Wars: Knights of the Old Republic"]
    );
}

#[test]
fn scenario_genre_filter_shrinks_page_count() {
    let games = seven_games();
    let rpg_count = games
        .iter()
        .filter(|game| game.genres.iter().any(|genre| genre == "RPG"))
        .count();
    assert_eq!(rpg_count, 2);

    for page_size in 1..=7 {
        let unfiltered = run(&games, &state(page_size, 1));
        let filtered = run(
            &games,
            &ViewState {
                genre_filter: GenreFilter::Genre("RPG".into()),
                ..state(page_size, 1)
            },
        );
        assert_eq!(filtered.total_pages, rpg_count.div_ceil(page_size));
        assert!(filtered.total_pages <= unfiltered.total_pages);
        assert!(
            filtered
                .visible_items
                .iter()
                .all(|game| game.genres.iter().any(|genre| genre == "RPG"))
        );
    }
}

#[test]
fn scenario_rating_sort_two_items() {
    let games = vec![
        Game::new("A", &["RPG"], 3.0, "a.jpg"),
        Game::new("B", &["RPG"], 5.0, "b.jpg"),
    ];
    let result = run(
        &games,
        &ViewState {
            sort_key: SortKey::Rating,
            ..state(6, 1)
        },
    );
    assert_eq!(titles(&result.visible_items), vec!["B", "A"]);
}

#[test]
fn scenario_no_filters_returns_everything() {
    let games = seven_games();
    let result = run(&games, &ViewState::new(PageSize::All));
    assert_eq!(result.visible_items.len(), games.len());
    assert_eq!(result.total_pages, 1);

    let input: BTreeSet<_> = titles(&games).into_iter().collect();
    let output: BTreeSet<_> = titles(&result.visible_items).into_iter().collect();
    assert_eq!(input, output);
}

// Every filtered item lands on exactly one page, for every filter and size.
#[test]
fn pages_partition_the_filtered_items() {
    let games = seven_games();
    let searches = ["", "a", "HOLLOW", "zzz", "o"];
    let mut filters = vec![GenreFilter::All];
    filters.extend(genre_options(&games).into_iter().map(GenreFilter::Genre));

    for search in searches {
        for filter in &filters {
            for sort_key in [SortKey::Title, SortKey::Rating] {
                for page_size in 1..=8 {
                    let base = ViewState {
                        search_term: search.to_string(),
                        genre_filter: filter.clone(),
                        sort_key,
                        ..state(page_size, 1)
                    };
                    let first = run(&games, &base);
                    let mut seen = BTreeSet::new();
                    let mut total = 0;
                    for page in 1..=first.total_pages {
                        let result = run(
                            &games,
                            &ViewState {
                                current_page: page,
                                ..base.clone()
                            },
                        );
                        assert!(result.visible_items.len() <= page_size);
                        assert!(!result.visible_items.is_empty());
                        for game in &result.visible_items {
                            assert!(
                                seen.insert(game.title.clone()),
                                "{} appeared twice",
                                game.title
                            );
                        }
                        total += result.visible_items.len();
                    }
                    assert_eq!(total, first.matched, "search={search:?} filter={filter}");

                    let past_end = run(
                        &games,
                        &ViewState {
                            current_page: first.total_pages + 1,
                            ..base.clone()
                        },
                    );
                    assert!(past_end.visible_items.is_empty());
                }
            }
        }
    }
}

#[test]
fn pipeline_is_idempotent() {
    let games = seven_games();
    let input = ViewState {
        search_term: "a".into(),
        sort_key: SortKey::Rating,
        ..state(2, 2)
    };
    assert_eq!(run(&games, &input), run(&games, &input));
}

#[test]
fn rating_sort_is_stable_for_ties() {
    let result = run(
        &seven_games(),
        &ViewState {
            sort_key: SortKey::Rating,
            ..state(10, 1)
        },
    );
    assert_eq!(
        titles(&result.visible_items),
        vec![
            "Portal 2",
            "Disco Elysium",
            "Hades",
            "Hollow Knight",
            "Celeste",
            "Star Wars: Knights of the Old Republic",
            "Dead Cells",
        ]
    );
}

#[test]
fn search_matches_case_insensitive_substrings() {
    let games = vec![
        Game::new("Star Wars", &["Sci-Fi"], 8.0, "sw.jpg"),
        Game::new("Celeste", &["Platformer"], 8.8, "celeste.jpg"),
    ];
    for term in ["war", "WAR", "Star", "star wars"] {
        let result = run(
            &games,
            &ViewState {
                search_term: term.into(),
                ..state(6, 1)
            },
        );
        assert_eq!(titles(&result.visible_items), vec!["Star Wars"], "{term}");
    }
}

#[test]
fn view_walks_through_a_browsing_session() -> Result<()> {
    let mut view = ListingView::new(seven_games(), ListingConfig::default());
    assert_eq!(view.page_controls(), 1..=2);

    view.apply(&ViewCommand::parse("page 2")?)?;
    assert_eq!(view.visible_items().len(), 1);

    view.apply(&ViewCommand::parse("genre Action")?)?;
    assert_eq!(view.state().current_page, 1);
    assert_eq!(
        titles(view.visible_items()),
        vec!["Dead Cells", "Hades", "Hollow Knight"]
    );

    view.apply(&ViewCommand::parse("sort rating")?)?;
    assert_eq!(
        titles(view.visible_items()),
        vec!["Hades", "Hollow Knight", "Dead Cells"]
    );

    view.apply(&ViewCommand::parse("per-page all")?)?;
    assert_eq!(view.total_pages(), 1);

    view.apply(&ViewCommand::parse("genre all")?)?;
    view.apply(&ViewCommand::parse("search knight")?)?;
    assert_eq!(
        titles(view.visible_items()),
        vec!["Hollow Knight", "Star Wars: Knights of the Old Republic"]
    );
    assert!(view.apply(&ViewCommand::parse("page 2")?).is_err());
    Ok(())
}

#[test]
fn search_after_paging_leaves_stale_page_by_default() {
    let mut view = ListingView::new(seven_games(), ListingConfig::default());
    view.set_current_page(2).unwrap();
    view.set_search_term("portal");
    assert_eq!(view.state().current_page, 2);
    assert_eq!(view.total_pages(), 1);
    assert!(view.visible_items().is_empty());
    view.set_current_page(1).unwrap();
    assert_eq!(titles(view.visible_items()), vec!["Portal 2"]);
}

#[test]
fn dataset_and_config_load_from_disk() -> Result<()> {
    let dataset = write_dataset(&seven_games())?;
    let config = write_text(r#"{"page_size_options": [3, "all"], "default_page_size": 3}"#)?;
    let view = open_listing(Some(dataset.path()), Some(config.path()), None)?;
    assert_eq!(view.total_pages(), 3);
    assert_eq!(view.visible_items().len(), 3);
    assert_eq!(view.genre_options()[0], "RPG");
    Ok(())
}

#[test]
fn duplicate_titles_fail_to_load() -> Result<()> {
    let mut games = seven_games();
    games.push(Game::new("Hades", &["Action"], 7.0, "hades2.jpg"));
    let dataset = write_dataset(&games)?;
    let err = GameIndex::load(dataset.path()).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate game title 'Hades'"));
    Ok(())
}

#[test]
fn cli_renders_requested_page() -> Result<()> {
    let dataset = write_dataset(&seven_games())?;
    let mut cmd = game_list_command();
    cmd.arg("--dataset").arg(dataset.path()).args(["--page", "2"]);
    let output = run_command(cmd)?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Star Wars: Knights of the Old Republic"));
    assert!(stdout.contains("  Genres: RPG, Sci-Fi"));
    assert!(stdout.contains("  Image:  /images/kotor.jpg"));
    assert!(!stdout.contains("Celeste"));
    assert!(stdout.trim_end().ends_with("Page 2 of 2 1 [2]"), "got: {stdout}");
    Ok(())
}

#[test]
fn cli_emits_json_snapshot() -> Result<()> {
    let dataset = write_dataset(&seven_games())?;
    let mut cmd = game_list_command();
    cmd.arg("--dataset")
        .arg(dataset.path())
        .args(["--genre", "RPG", "--sort", "rating", "--format", "json"]);
    let output = run_command(cmd)?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["total_pages"], 1);
    assert_eq!(value["genre_filter"], "RPG");
    assert_eq!(value["items"][0]["title"], "Disco Elysium");
    assert_eq!(
        value["items"][1]["title"],
        "Star Wars: Knights of the Old Republic"
    );
    Ok(())
}

#[test]
fn cli_reads_dataset_from_environment() -> Result<()> {
    let dataset = write_dataset(&[Game::new("Only Game", &["Puzzle"], 7.5, "only.jpg")])?;
    let mut cmd = game_list_command();
    cmd.env(gamelist::DATASET_ENV, dataset.path()).arg("--genres");
    let output = run_command(cmd)?;
    assert_eq!(String::from_utf8(output.stdout)?, "all\nPuzzle\n");
    Ok(())
}

#[test]
fn cli_reads_config_from_environment() -> Result<()> {
    let dataset = write_dataset(&seven_games())?;
    let config = write_text(r#"{"default_page_size": 10, "image_root": "/static"}"#)?;
    let mut cmd = game_list_command();
    cmd.env(gamelist::CONFIG_ENV, config.path())
        .arg("--dataset")
        .arg(dataset.path());
    let output = run_command(cmd)?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("show   : 10 per page"), "got: {stdout}");
    assert!(stdout.contains("  Image:  /static/kotor.jpg"));
    assert!(stdout.trim_end().ends_with("Page 1 of 1 [1]"), "got: {stdout}");
    Ok(())
}

#[test]
fn cli_validates_against_schema_flag() -> Result<()> {
    let dataset = write_dataset(&seven_games())?;
    let schema = write_text(
        r#"{"schema_version": "game_catalog_v1", "type": "array",
            "items": {"properties": {"rating": {"maximum": 9.2}}}}"#,
    )?;

    let mut cmd = game_list_command();
    cmd.arg("--dataset")
        .arg(dataset.path())
        .arg("--schema")
        .arg(schema.path());
    let output = cmd.output()?;
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("/4/rating"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let mut cmd = game_list_command();
    cmd.arg("--dataset").arg(dataset.path());
    run_command(cmd)?;
    Ok(())
}

#[test]
fn cli_rejects_out_of_range_page_and_bad_page_size() -> Result<()> {
    let dataset = write_dataset(&seven_games())?;

    let mut cmd = game_list_command();
    cmd.arg("--dataset").arg(dataset.path()).args(["--page", "3"]);
    let output = cmd.output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("page 3 is outside 1..=2"));

    let mut cmd = game_list_command();
    cmd.arg("--dataset").arg(dataset.path()).args(["--per-page", "0"]);
    let output = cmd.output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("greater than zero"));
    Ok(())
}

#[test]
fn cli_interactive_session() -> Result<()> {
    let dataset = write_dataset(&seven_games())?;
    let mut cmd = game_list_command();
    cmd.arg("--dataset")
        .arg(dataset.path())
        .args(["--interactive", "--format", "json"]);
    let output = run_with_stdin(cmd, "genre Action\nbogus\npage 2\nsort rating\nquit\nshow\n")?;
    assert!(output.status.success());

    let snapshots: Vec<Value> = String::from_utf8(output.stdout)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    // initial render, genre, sort; "page 2" fails because Action fits on one page
    assert_eq!(snapshots.len(), 3);
    assert_eq!(snapshots[1]["genre_filter"], "Action");
    assert_eq!(snapshots[2]["sort_key"], "rating");
    assert_eq!(snapshots[2]["items"][0]["title"], "Hades");

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("unknown command 'bogus'"));
    assert!(stderr.contains("page 2 is outside 1..=1"));
    Ok(())
}
