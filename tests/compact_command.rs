use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use compact_admin::{
    compaction::{CompactionRequest, DispatchError, RequestError},
    config::AdminConfig,
    iterator::{InMemoryIteratorProfiles, IteratorSetting},
    table_ops::{
        InMemoryTableOperations, OpFuture, TableCompactions, TableOpError, TableOperations,
    },
    CompactCommand, CompactFlag, DispatchStatus, Error, OptionValues,
};

fn command_with(
    ops: Arc<dyn TableOperations>,
) -> (Arc<InMemoryIteratorProfiles>, CompactCommand) {
    let profiles = Arc::new(InMemoryIteratorProfiles::new());
    profiles.insert(
        "dedupe",
        vec![
            IteratorSetting::new(20, "vers", "VersioningIterator")
                .with_option("maxVersions", "1"),
        ],
    );
    let command = CompactCommand::new(Arc::clone(&profiles) as _, ops);
    (profiles, command)
}

#[tokio::test]
async fn compact_then_cancel_round_trip() {
    let ops = Arc::new(InMemoryTableOperations::with_tables(["events"]));
    let (_profiles, command) = command_with(Arc::clone(&ops) as _);

    let options = OptionValues::new()
        .with_value(CompactFlag::BeginRow, "a")
        .with_value(CompactFlag::EndRow, "m")
        .with_value(CompactFlag::Profile, "dedupe")
        .with_value(CompactFlag::Strategy, "SizeLimitCompactionStrategy")
        .with_value(CompactFlag::StrategyConfig, "size=1M");
    let status = command
        .build_and_dispatch(&options, "events")
        .await
        .expect("compact");
    assert_eq!(
        status,
        DispatchStatus::Started {
            table: "events".to_string()
        }
    );

    let running = ops
        .compactions("events")
        .expect("lock")
        .expect("table")
        .running;
    assert_eq!(running.len(), 1);
    let request = &running[0];
    assert!(request.flush);
    assert_eq!(request.range.start.as_deref(), Some(&b"a"[..]));
    assert_eq!(request.range.end.as_deref(), Some(&b"m"[..]));
    assert_eq!(request.iterators.len(), 1);
    let strategy = request.strategy.as_ref().expect("strategy");
    assert_eq!(strategy.options.get("size").map(String::as_str), Some("1M"));

    let cancel = OptionValues::new().with_flag(CompactFlag::Cancel);
    let status = command
        .build_and_dispatch(&cancel, "events")
        .await
        .expect("cancel");
    assert_eq!(status.to_string(), "Compaction canceled for table events");
    let state = ops.compactions("events").expect("lock").expect("table");
    assert!(state.running.is_empty());
    assert_eq!(state.canceled, 1);
}

#[tokio::test]
async fn local_failures_never_reach_the_remote_side() {
    let ops = Arc::new(InMemoryTableOperations::with_tables(["events"]));
    let (_profiles, command) = command_with(Arc::clone(&ops) as _);

    let conflicting = OptionValues::new()
        .with_flag(CompactFlag::Cancel)
        .with_flag(CompactFlag::Wait);
    let err = command
        .build_and_dispatch(&conflicting, "events")
        .await
        .expect_err("conflict");
    assert!(err.is_local());
    assert!(matches!(
        err,
        Error::Request(RequestError::ConflictingOptions { .. })
    ));

    let unknown = OptionValues::new().with_value(CompactFlag::Profile, "nope");
    let err = command
        .build_and_dispatch(&unknown, "events")
        .await
        .expect_err("unknown profile");
    assert!(matches!(err, Error::Request(RequestError::UnknownProfile(ref p)) if p == "nope"));

    let malformed = OptionValues::new()
        .with_value(CompactFlag::Strategy, "s")
        .with_value(CompactFlag::StrategyConfig, "a=1,bad");
    let err = command
        .build_and_dispatch(&malformed, "events")
        .await
        .expect_err("malformed");
    assert_eq!(
        err.to_string(),
        "malformed strategy option `bad`, expected <prop>=<value>"
    );

    assert_eq!(
        ops.compactions("events").expect("lock").expect("table"),
        TableCompactions::default()
    );
}

#[tokio::test]
async fn later_profile_edits_do_not_leak_into_built_requests() {
    let ops = Arc::new(InMemoryTableOperations::with_tables(["events"]));
    let (profiles, command) = command_with(Arc::clone(&ops) as _);

    let options = OptionValues::new().with_value(CompactFlag::Profile, "dedupe");
    let intent = command.build(&options, "events").expect("build");
    profiles.insert("dedupe", Vec::new());

    match intent {
        compact_admin::CompactionIntent::Compact(request) => {
            assert_eq!(request.iterators.len(), 1);
            assert_eq!(request.iterators[0].name, "vers");
        }
        other => panic!("unexpected intent {other:?}"),
    }
}

#[tokio::test]
async fn cancel_on_unknown_table_is_table_not_found() {
    let ops = Arc::new(InMemoryTableOperations::new());
    let (_profiles, command) = command_with(ops as _);

    let err = command
        .build_and_dispatch(&OptionValues::new().with_flag(CompactFlag::Cancel), "ghost")
        .await
        .expect_err("missing");
    assert!(!err.is_local());
    assert!(matches!(
        err,
        Error::Dispatch(DispatchError::TableNotFound(ref t)) if t == "ghost"
    ));
}

/// Table operations whose compaction takes real time to finish when waited on.
struct SlowOps {
    finished: AtomicUsize,
}

impl TableOperations for SlowOps {
    fn compact<'a>(&'a self, _table: &'a str, request: &'a CompactionRequest) -> OpFuture<'a> {
        Box::pin(async move {
            if request.wait {
                tokio::time::sleep(Duration::from_millis(50)).await;
                self.finished.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        })
    }

    fn cancel_compaction<'a>(&'a self, _table: &'a str) -> OpFuture<'a> {
        Box::pin(async { Err(TableOpError::Remote("unsupported".to_string())) })
    }
}

#[tokio::test]
async fn wait_reports_completion_only_after_remote_returns() {
    let ops = Arc::new(SlowOps {
        finished: AtomicUsize::new(0),
    });
    let (_profiles, command) = command_with(Arc::clone(&ops) as _);

    let status = command
        .build_and_dispatch(&OptionValues::new(), "events")
        .await
        .expect("start");
    assert_eq!(status.to_string(), "Compaction of table events started for given range");
    assert_eq!(ops.finished.load(Ordering::SeqCst), 0);

    let wait = OptionValues::new().with_flag(CompactFlag::Wait);
    let status = command
        .build_and_dispatch(&wait, "events")
        .await
        .expect("wait");
    assert_eq!(
        status,
        DispatchStatus::Completed {
            table: "events".to_string()
        }
    );
    assert_eq!(ops.finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn config_seeds_command_collaborators() {
    let config = AdminConfig::default().with_table("events").with_profile(
        "dedupe",
        vec![IteratorSetting::new(20, "vers", "VersioningIterator")],
    );
    let ops = Arc::new(config.table_operations());
    let command = CompactCommand::new(
        Arc::new(config.iterator_profiles()),
        Arc::clone(&ops) as Arc<dyn TableOperations>,
    );

    let options = OptionValues::new()
        .with_value(CompactFlag::Profile, "dedupe")
        .with_flag(CompactFlag::NoFlush)
        .with_flag(CompactFlag::Wait);
    command
        .build_and_dispatch(&options, "events")
        .await
        .expect("compact");
    let completed = ops
        .compactions("events")
        .expect("lock")
        .expect("table")
        .completed;
    assert_eq!(completed.len(), 1);
    assert!(!completed[0].flush);
}
