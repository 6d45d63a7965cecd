use billnarrator::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;

fn write_json(path: &Path, value: serde_json::Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn bill_json(id: u32, url: &str) -> serde_json::Value {
    json!({
        "id": id,
        "url": url,
        "full_name": format!("{} Bill", url),
        "bill_type": "government",
        "member_in_charge": { "full_name": "Jane Doe", "id_name": "jane_doe" }
    })
}

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        &dir.path().join("committees.json"),
        json!([{
            "id": 4,
            "full_committee_name": "Finance and Expenditure Committee",
            "url": "finance_and_expenditure"
        }]),
    );

    write_json(
        &dir.path().join("bills/a_taxation.json"),
        json!({
            "bill": bill_json(1, "taxation"),
            "events": [
                {
                    "name": "First Reading",
                    "date": "2008-08-12",
                    "source": { "type": "debate", "id": 7 },
                    "debates": [{
                        "id": 7,
                        "date": "2008-08-12",
                        "url": "http://theyworkforyou.co.nz/debates/2008/aug/12/taxation",
                        "contributions": [
                            { "kind": "speech", "text": "<p>I move, That the bill be referred to the Finance and Expenditure Committee.</p>" },
                            { "kind": "procedural", "text": "<p>Motion agreed to.</p>" }
                        ]
                    }],
                    "votes": [{
                        "question": "That the bill be now read a first time.",
                        "result": "Bill read a first time.",
                        "ayes_count": 64,
                        "noes_count": 57
                    }]
                },
                {
                    "name": "Submissions Due",
                    "date": "2008-09-30"
                }
            ]
        }),
    );

    write_json(
        &dir.path().join("bills/b_broken.json"),
        json!({
            "bill": bill_json(2, "broken"),
            "events": [{
                "name": "Introduction",
                "date": "2008-07-01",
                "source": { "type": "nzl_event", "id": 99 }
            }]
        }),
    );
    dir
}

fn collect(processor: &NarrativeProcessor) -> Vec<Result<EventSummary>> {
    tokio_test::block_on(async {
        let mut stream = processor.process();
        let mut results = Vec::new();
        while let Some(result) = stream.next().await {
            results.push(result);
        }
        results
    })
}

#[test]
fn test_processes_every_event_and_persists_referral() {
    let dir = data_dir();
    let config = ConfigBuilder::new(dir.path()).build().unwrap();
    let processor = NarrativeProcessor::from_config(config).unwrap();

    let results = collect(&processor);
    assert_eq!(results.len(), 3);

    let first = results[0].as_ref().unwrap();
    assert_eq!(first.event, "First Reading");
    assert_eq!(first.url, "http://theyworkforyou.co.nz/debates/2008/aug/12/taxation");

    // The referral is now on the bill, so the later event sees it
    let second = results[1].as_ref().unwrap();
    assert_eq!(second.event, "Submissions Due");
    assert!(second.result.contains("committees/finance_and_expenditure"));

    assert!(matches!(
        results[2],
        Err(Error::MissingReference { kind: "nzl_event", .. })
    ));

    let saved: BillDossier = serde_json::from_str(
        &fs::read_to_string(dir.path().join("bills/a_taxation.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        saved.bill.referred_to_committee.map(|c| c.url),
        Some("finance_and_expenditure".to_string())
    );
    assert_eq!(saved.events.len(), 2);
}

#[test]
fn test_no_write_back_leaves_files_alone() {
    let dir = data_dir();
    let path = dir.path().join("bills/a_taxation.json");
    let before = fs::read_to_string(&path).unwrap();

    let config = ConfigBuilder::new(dir.path())
        .write_back(false)
        .build()
        .unwrap();
    let processor = NarrativeProcessor::from_config(config).unwrap();
    let results = collect(&processor);

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[tokio::test]
async fn test_descending_order_with_limit() {
    let dir = data_dir();
    let config = ConfigBuilder::new(dir.path())
        .sort_order(SortOrder::Descending)
        .limit(1)
        .build()
        .unwrap();
    let processor = NarrativeProcessor::from_config(config).unwrap();

    let mut stream = processor.process();
    let mut results = Vec::new();
    while let Some(result) = stream.next().await {
        results.push(result);
    }

    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
}

#[tokio::test]
async fn test_unreadable_dossier_is_reported_and_skipped() {
    let dir = data_dir();
    fs::write(dir.path().join("bills/c_truncated.json"), "{\"bill\": ").unwrap();
    let config = ConfigBuilder::new(dir.path()).build().unwrap();
    let processor = NarrativeProcessor::from_config(config).unwrap();

    let mut stream = processor.process();
    let mut errors = 0;
    let mut summaries = 0;
    while let Some(result) = stream.next().await {
        match result {
            Ok(_) => summaries += 1,
            Err(_) => errors += 1,
        }
    }
    assert_eq!(summaries, 2);
    assert_eq!(errors, 2);
}
