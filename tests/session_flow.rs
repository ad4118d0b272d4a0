//! End-to-end scripted session against an on-disk workbook.
//!
//! Run with: cargo test --test session_flow

use anyhow::Result;
use readme_wizard::config::OutputSection;
use readme_wizard::readme::Readme;
use readme_wizard::sections::DocumentInfo;
use readme_wizard::session::Session;
use readme_wizard::store::{SqliteWorkbook, Workbook};
use readme_wizard::terminal::{ScriptedLines, Terminal};
use std::fs;
use tempfile::TempDir;

/// Create "Demo", fill every section, write the file, go back and exit.
fn full_session_script() -> ScriptedLines {
    ScriptedLines::new(["1", "Demo"])
        // Add Section -> Introduction
        .lines(["1", "1", "Demo app"])
        .end_of_input()
        .lines(["http://x", "img.png"])
        // Add Section -> User Experience -> Site Aims -> Add
        .lines(["1", "2", "1", "1", "grow users", "retain users"])
        .end_of_input()
        // Return from aims, then User Stories -> Add
        .lines(["5", "3", "1", "click login", "sign in", "5"])
        // Flowchart, then leave the hub
        .lines(["4", "flow.png", "5"])
        // Add Section -> Features -> Add
        .lines(["1", "3", "1", "Search", "fast", "y", "typo tolerant", "n"])
        .lines(["search.png", "Search box", "5"])
        // Create Readme File, pause, Return to Main Menu, Exit
        .lines(["3", "", "4", "3"])
}

#[test]
fn test_full_session_writes_readme() -> Result<()> {
    let tmp = TempDir::new()?;
    let db = tmp.path().join("readmes.db");
    let output = OutputSection {
        file: tmp.path().join("README.md"),
        image_base_path: "assets".to_string(),
    };

    let workbook = SqliteWorkbook::open(&db)?;
    let mut session = Session::new(
        Terminal::scripted(full_session_script()),
        Box::new(workbook),
        output.clone(),
    );
    session.start()?;
    assert!(session.current_readme().is_none());

    let written = fs::read_to_string(&output.file)?;
    let expected_order = [
        "# Demo",
        "## Introduction",
        "<img src=\"assets/img.png\"",
        "Demo app",
        "<a href='http://x' target='_blank' rel='noopener'>Demo</a>",
        "## User Experience",
        " * Grow users\n * Retain users\n",
        "| 1  | sign in | click login |",
        "![Demo Flowchart](assets/flow.png)",
        "## Features",
        "### Search",
        " * Fast\n * Typo tolerant\n",
        "alt=\"Search box\"",
    ];
    let mut cursor = 0;
    for fragment in expected_order {
        let found = written[cursor..]
            .find(fragment)
            .unwrap_or_else(|| panic!("missing or out of order: {fragment:?}\n{written}"));
        cursor += found + fragment.len();
    }

    // A fresh process sees exactly what was written.
    let mut reopened = SqliteWorkbook::open(&db)?;
    assert_eq!(reopened.titles()?, vec!["Demo"]);
    let doc = DocumentInfo::new("Demo").with_image_base_path("assets");
    let readme = Readme::load(doc, reopened.open("Demo")?)?;
    assert_eq!(readme.output_raw(), written);
    Ok(())
}

#[test]
fn test_piped_input_ending_early_is_an_error() -> Result<()> {
    let tmp = TempDir::new()?;
    let workbook = SqliteWorkbook::open(tmp.path().join("readmes.db"))?;
    let mut session = Session::new(
        Terminal::scripted(ScriptedLines::new(["1"])),
        Box::new(workbook),
        OutputSection::default(),
    );

    let err = session.start().unwrap_err();
    assert!(err.to_string().contains("input stream closed"));
    Ok(())
}
