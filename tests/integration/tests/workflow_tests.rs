//! End-to-end moderation workflow tests
//!
//! Each test drives whole conversations through the console gateway with
//! ledgers in a temporary directory.

use futures::future::join_all;
use integration_tests::*;
use serde_json::json;

// ============================================================================
// Intake
// ============================================================================

#[tokio::test]
async fn test_false_profile_report_is_filed_to_ledger() {
    let harness = TestHarness::start().await.unwrap();

    let out = harness.send(ALICE, "report").await.unwrap();
    assert!(replies_to(&out, ALICE)[0].starts_with("Thank you for starting the reporting process."));

    let out = harness.send(ALICE, &spam_link()).await.unwrap();
    let replies = replies_to(&out, ALICE);
    assert_eq!(replies[0], "I found this message:");
    assert!(replies.iter().any(|l| l.contains("buy followers at my link")));

    let out = harness.converse(ALICE, &["2", "3"]).await.unwrap();
    let replies = replies_to(&out, ALICE).join("\n");
    assert!(replies.contains("please have them also reach out to us"));

    let out = harness.converse(ALICE, &["skip", "1", "2"]).await.unwrap();
    assert_eq!(
        replies_to(&out, ALICE),
        vec![
            "Done".to_string(),
            "Your report has been filed with ID 1.".to_string()
        ]
    );

    let ledger = harness.report_ledger().await.unwrap();
    let stored = &ledger["user_reports"][ALICE.to_string()][0];
    assert_eq!(stored["id"], 1);
    assert_eq!(stored["reported_user"], "mallory");
    assert_eq!(stored["reported_user_id"], MALLORY.to_string());
    assert_eq!(stored["reported_by"], "alice");
    assert_eq!(stored["message_content"], "buy followers at my link");
    assert_eq!(stored["reported_reason"], "False profile");
    assert_eq!(
        stored["relevant_concerns"],
        json!(["Profile uses pictures of a different person or is impersonating someone"])
    );
    assert_eq!(stored["additional_info"], serde_json::Value::Null);
    assert_eq!(stored["requested_unmatch"], true);
    assert_eq!(stored["requested_block"], false);
    assert_eq!(stored["priority"], serde_json::Value::Null);
    assert_eq!(stored["status"], "Open");
}

#[tokio::test]
async fn test_filing_continues_existing_numbering() {
    let seeded = report_ledger(&[
        ReportRecord::open(4, BOB, "bob").priority("Low").closed(),
        ReportRecord::open(11, BOB, "bob"),
    ]);
    let harness = TestHarness::builder().reports(&seeded).start().await.unwrap();

    let out = harness
        .converse(ALICE, &["report", &spam_link(), "3", "4", "second account", "2"])
        .await
        .unwrap();

    assert_eq!(
        replies_to(&out, ALICE).last().map(String::as_str),
        Some("Your report has been filed with ID 12.")
    );
    let ledger = harness.report_ledger().await.unwrap();
    assert!(stored_report(&ledger, 4).is_some());
    assert_eq!(stored_report(&ledger, 12).unwrap()["additional_info"], "second account");
}

#[tokio::test]
async fn test_concurrent_intakes_get_distinct_ids() {
    let harness = TestHarness::start().await.unwrap();
    let reporters = [ALICE, BOB, MODERATOR, SECOND_MODERATOR];

    let link = spam_link();
    let runs = reporters.iter().map(|&user| {
        let harness = &harness;
        let link = link.clone();
        async move {
            harness
                .converse(user, &["report", &link, "3", "4", "skip", "2"])
                .await
                .unwrap()
        }
    });
    let outputs = join_all(runs).await;

    let mut ids: Vec<u64> = outputs
        .iter()
        .zip(reporters)
        .map(|(out, user)| {
            let filed = replies_to(out, user).pop().unwrap();
            filed
                .trim_start_matches("Your report has been filed with ID ")
                .trim_end_matches('.')
                .parse()
                .unwrap()
        })
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_cancelled_intake_writes_nothing() {
    let harness = TestHarness::start().await.unwrap();

    let out = harness
        .converse(ALICE, &["report", &spam_link(), "cancel"])
        .await
        .unwrap();

    assert_eq!(replies_to(&out, ALICE), vec!["Report cancelled.".to_string()]);
    assert!(harness.report_ledger().await.is_err());
    assert_eq!(harness.gateway.router().active_sessions(), 0);
}

// ============================================================================
// Review
// ============================================================================

#[tokio::test]
async fn test_prioritize_then_evaluate_in_priority_order() {
    let seeded = report_ledger(&[
        ReportRecord::open(1, BOB, "bob").priority("Low").closed(),
        ReportRecord::open(2, ALICE, "alice").priority("Low"),
        ReportRecord::open(3, BOB, "bob"),
        ReportRecord::open(5, ALICE, "alice").priority("High"),
    ]);
    let harness = TestHarness::builder().reports(&seeded).start().await.unwrap();

    let out = harness.converse(MODERATOR, &["review", "1"]).await.unwrap();
    let listing = replies_to(&out, MODERATOR).join("\n");
    assert!(listing.contains("ID: 3 - Priority: Unassigned"));
    assert!(!listing.contains("ID: 2 -"));

    let out = harness.converse(MODERATOR, &["3", "1", "2"]).await.unwrap();
    assert_eq!(
        replies_to(&out, MODERATOR),
        vec!["Report 3 has been given Medium priority.".to_string()]
    );

    let out = harness.converse(MODERATOR, &["review", "2"]).await.unwrap();
    let listing = replies_to(&out, MODERATOR).join("\n");
    let high = listing.find("ID: 5 - Priority: High").unwrap();
    let medium = listing.find("ID: 3 - Priority: Medium").unwrap();
    let low = listing.find("ID: 2 - Priority: Low").unwrap();
    assert!(high < medium && medium < low);
    assert!(!listing.contains("ID: 1 -"));
}

#[tokio::test]
async fn test_concurrent_prioritization_has_one_winner() {
    let seeded = report_ledger(&[ReportRecord::open(1, ALICE, "alice")]);
    let harness = TestHarness::builder().reports(&seeded).start().await.unwrap();

    for moderator in [MODERATOR, SECOND_MODERATOR] {
        harness.converse(moderator, &["review", "1", "1"]).await.unwrap();
    }

    let (first, second) = tokio::join!(
        harness.converse(MODERATOR, &["1", "1"]),
        harness.converse(SECOND_MODERATOR, &["2"]),
    );
    let answers = [
        replies_to(&first.unwrap(), MODERATOR).join("\n"),
        replies_to(&second.unwrap(), SECOND_MODERATOR).join("\n"),
    ];

    let winners = answers.iter().filter(|a| a.contains("has been given")).count();
    let losers = answers
        .iter()
        .filter(|a| a.contains("has already been prioritized by another moderator"))
        .count();
    assert_eq!((winners, losers), (1, 1));

    let ledger = harness.report_ledger().await.unwrap();
    let priority = stored_report(&ledger, 1).unwrap()["priority"].clone();
    assert!(priority == "High" || priority == "Low");
    assert_eq!(harness.gateway.router().active_sessions(), 0);
}

#[tokio::test]
async fn test_repeat_offender_is_banned_and_notified() {
    let seeded = report_ledger(&[
        ReportRecord::open(1, ALICE, "alice").priority("High"),
        ReportRecord::open(2, BOB, "bob").priority("Low"),
        ReportRecord::open(3, BOB, "bob").priority("Low").closed(),
    ]);
    let harness = TestHarness::builder().reports(&seeded).start().await.unwrap();

    let out = harness
        .converse(MODERATOR, &["review", "2", "1", "2"])
        .await
        .unwrap();
    assert_eq!(
        direct_messages_to(&out, MALLORY),
        vec!["Your account has been banned as a result of scam or spam violations.".to_string()]
    );
    let replies = replies_to(&out, MODERATOR);
    assert_eq!(replies[0], "User has a total of 3 reports filed against them.");

    let out = harness.send(MODERATOR, "2").await.unwrap();
    assert_eq!(replies_to(&out, MODERATOR), vec!["User has been banned".to_string()]);
    assert_eq!(direct_messages_to(&out, MALLORY).len(), 1);

    let ledger = harness.report_ledger().await.unwrap();
    let stored = stored_report(&ledger, 1).unwrap();
    assert_eq!(stored["status"], "Closed");
    assert_eq!(stored["resolution"]["action"], json!("Ban"));
    assert_eq!(stored["resolution"]["sanction"], json!("Ban"));
    assert_eq!(stored["resolution"]["moderator_id"], MODERATOR.to_string());
}

#[tokio::test]
async fn test_third_false_report_suspends_reporter() {
    let seeded = report_ledger(&[ReportRecord::open(7, ALICE, "alice").priority("Medium")]);
    let mut credibility = serde_json::Map::new();
    credibility.insert(ALICE.to_string(), json!(2));
    let credibility = serde_json::Value::Object(credibility);
    let harness = TestHarness::builder()
        .reports(&seeded)
        .credibility(&credibility)
        .start()
        .await
        .unwrap();

    let out = harness
        .converse(MODERATOR, &["review", "2", "7", "6"])
        .await
        .unwrap();
    assert!(replies_to(&out, MODERATOR).join("\n").contains("Was it a false report?"));

    let out = harness.send(MODERATOR, "1").await.unwrap();
    assert_eq!(
        replies_to(&out, MODERATOR),
        vec!["Reporter has been suspended for repeated false reporting.".to_string()]
    );
    assert_eq!(
        direct_messages_to(&out, ALICE),
        vec!["You have been suspended for repeated false reporting.".to_string()]
    );

    assert_eq!(harness.credibility_ledger().await.unwrap()[ALICE.to_string()], 3);
    let ledger = harness.report_ledger().await.unwrap();
    assert_eq!(stored_report(&ledger, 7).unwrap()["status"], "Closed");
}

#[tokio::test]
async fn test_escalation_leaves_report_open() {
    let seeded = report_ledger(&[ReportRecord::open(1, ALICE, "alice").priority("High")]);
    let harness = TestHarness::builder().reports(&seeded).start().await.unwrap();

    let out = harness
        .converse(MODERATOR, &["review", "2", "1", "1", "1"])
        .await
        .unwrap();

    assert!(replies_to(&out, MODERATOR)[0].starts_with("System escalating to"));
    let ledger = harness.report_ledger().await.unwrap();
    assert_eq!(stored_report(&ledger, 1).unwrap()["status"], "Open");
}

#[tokio::test]
async fn test_review_limited_to_configured_moderators() {
    let harness = TestHarness::builder()
        .var("MODERATOR_IDS", MODERATOR.to_string())
        .start()
        .await
        .unwrap();

    let out = harness.send(ALICE, "review").await.unwrap();
    assert_eq!(
        replies_to(&out, ALICE),
        vec!["Only moderators can start a review.".to_string()]
    );

    let out = harness.send(MODERATOR, "review").await.unwrap();
    assert!(replies_to(&out, MODERATOR)
        .iter()
        .any(|l| l.contains("1. Prioritize new reports")));
}

// ============================================================================
// Storage failures
// ============================================================================

#[tokio::test]
async fn test_corrupt_ledger_is_never_overwritten() {
    let harness = TestHarness::builder()
        .raw_reports("{ not json")
        .start()
        .await
        .unwrap();

    let out = harness.converse(MODERATOR, &["review", "1"]).await.unwrap();
    assert_eq!(
        replies_to(&out, MODERATOR)[0],
        "No reports are awaiting prioritization."
    );

    let out = harness
        .converse(ALICE, &["report", &spam_link(), "3", "4", "skip", "2"])
        .await
        .unwrap();
    assert_eq!(
        replies_to(&out, ALICE).last().map(String::as_str),
        Some("Your report could not be saved right now. Please try again later.")
    );

    let raw = tokio::fs::read_to_string(&harness.config.storage.report_ledger_path)
        .await
        .unwrap();
    assert_eq!(raw, "{ not json");
}

// ============================================================================
// Console stream
// ============================================================================

#[tokio::test]
async fn test_console_run_reports_bad_lines_and_continues() {
    let harness = TestHarness::start().await.unwrap();
    let input = format!(
        "not a line\n\n555: hello\n{ALICE}: report\n{ALICE}: {}\n{ALICE}: cancel\n",
        spam_link()
    );

    let mut output = Vec::new();
    harness
        .gateway
        .run(input.as_bytes(), &mut output)
        .await
        .unwrap();

    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "!! Invalid input line: not a line");
    assert_eq!(lines[1], "!! Unknown user 555");
    assert!(lines[2].starts_with(&format!("-> {ALICE}: Thank you for starting")));
    assert!(output.contains(&format!("-> {ALICE}: I found this message:")));
    assert_eq!(lines.last().copied(), Some(format!("-> {ALICE}: Report cancelled.").as_str()));
    assert_eq!(harness.gateway.router().active_sessions(), 0);
}

#[tokio::test]
async fn test_unique_suffix_increments() {
    let a = unique_suffix();
    let b = unique_suffix();
    assert!(b > a);
}
