use docs_sidebar::{app::App, screenshot::render_to_string, snapshot::Snapshot};
use std::fs;
use std::path::{Path, PathBuf};

const WIDTH: u16 = 80;
const HEIGHT: u16 = 25;

/// Test structure to hold test case information
#[derive(Debug)]
struct RenderingTest {
    name: String,
    state_path: PathBuf,
    expected_path: PathBuf,
}

impl RenderingTest {
    fn named(name: &str) -> Self {
        let dir = rendering_dir();
        Self {
            name: name.to_string(),
            state_path: dir.join(format!("{}.json", name)),
            expected_path: dir.join(format!("{}.expected.txt", name)),
        }
    }
}

fn rendering_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/rendering_tests")
}

/// Discover all rendering tests in the tests/rendering_tests directory
fn discover_rendering_tests() -> Vec<RenderingTest> {
    let mut tests = Vec::new();

    if let Ok(entries) = fs::read_dir(rendering_dir()) {
        for entry in entries.flatten() {
            let path = entry.path();
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                if let Some(name) = file_name.strip_suffix(".json") {
                    let test = RenderingTest::named(name);
                    // Only include tests where the expected file exists
                    if test.expected_path.exists() {
                        tests.push(test);
                    }
                }
            }
        }
    }

    tests.sort_by(|a, b| a.name.cmp(&b.name));
    tests
}

/// Every non-empty line of the expected file must appear somewhere on screen.
fn missing_fragments<'a>(screen: &str, expected: &'a str) -> Vec<&'a str> {
    expected
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|fragment| !screen.contains(fragment))
        .collect()
}

/// Run a single rendering test
fn run_rendering_test(test: &RenderingTest) -> Result<(), String> {
    let snapshot = Snapshot::load_from_file(&test.state_path)
        .map_err(|e| format!("Failed to load state {}: {}", test.state_path.display(), e))?;

    let app = App::from_snapshot(&snapshot);
    let screen = render_to_string(&app, WIDTH, HEIGHT)
        .map_err(|e| format!("Failed to render {}: {}", test.name, e))?;

    let expected = fs::read_to_string(&test.expected_path).map_err(|e| {
        format!(
            "Failed to load expected fragments {}: {}",
            test.expected_path.display(),
            e
        )
    })?;

    let missing = missing_fragments(&screen, &expected);
    if !missing.is_empty() {
        return Err(format!(
            "Screen for '{}' is missing {:?}:\n{}",
            test.name, missing, screen
        ));
    }

    Ok(())
}

/// Test that all rendering tests pass
#[test]
fn test_all_rendering() {
    let tests = discover_rendering_tests();

    if tests.is_empty() {
        panic!("No rendering tests found in tests/rendering_tests/");
    }

    let mut failures = Vec::new();

    for test in &tests {
        if let Err(error) = run_rendering_test(test) {
            failures.push(format!("❌ {}: {}", test.name, error));
        } else {
            println!("✅ {}: PASSED", test.name);
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} rendering test(s) failed:\n{}",
            failures.len(),
            failures.join("\n")
        );
    }
}

/// Individual test functions for each specific test case
/// These allow running specific tests with `cargo test test_rendering_default_sidebar`

#[test]
fn test_rendering_default_sidebar() {
    if let Err(error) = run_rendering_test(&RenderingTest::named("default_sidebar")) {
        panic!("Rendering test failed: {}", error);
    }
}

#[test]
fn test_rendering_filtering_multiple() {
    if let Err(error) = run_rendering_test(&RenderingTest::named("filtering_multiple")) {
        panic!("Rendering test failed: {}", error);
    }
}

#[test]
fn test_rendering_filtering_single() {
    if let Err(error) = run_rendering_test(&RenderingTest::named("filtering_single")) {
        panic!("Rendering test failed: {}", error);
    }
}

#[test]
fn test_rendering_custom_shortcut() {
    if let Err(error) = run_rendering_test(&RenderingTest::named("custom_shortcut")) {
        panic!("Rendering test failed: {}", error);
    }
}

#[test]
fn test_single_candidate_has_no_arrows() {
    let snapshot = Snapshot::load_from_file(rendering_dir().join("filtering_single.json")).unwrap();
    let screen = render_to_string(&App::from_snapshot(&snapshot), WIDTH, HEIGHT).unwrap();
    assert!(!screen.contains('↕'));
}

#[test]
fn test_idle_sidebar_shows_no_selection_label() {
    let snapshot = Snapshot::load_from_file(rendering_dir().join("default_sidebar.json")).unwrap();
    let screen = render_to_string(&App::from_snapshot(&snapshot), WIDTH, HEIGHT).unwrap();
    assert!(!screen.contains("Enter "));
}

#[test]
fn test_hidden_empty_groups() {
    let mut snapshot = Snapshot::load_from_file(rendering_dir().join("default_sidebar.json")).unwrap();
    snapshot.config.layout.show_getting_started = false;

    let screen = render_to_string(&App::from_snapshot(&snapshot), WIDTH, HEIGHT).unwrap();
    assert!(screen.contains("Collections"));

    snapshot.config.layout.hide_empty_groups = true;
    let screen = render_to_string(&App::from_snapshot(&snapshot), WIDTH, HEIGHT).unwrap();
    assert!(!screen.contains("Collections"));
    assert!(screen.contains("Views"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let snapshot = Snapshot::load_from_file(rendering_dir().join("filtering_multiple.json")).unwrap();
    let app = App::from_snapshot(&snapshot);
    assert!(render_to_string(&app, 10, 4).is_ok());
}
