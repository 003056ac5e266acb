//! Integration tests for the logging facade
//!
//! These tests verify:
//! - Argument classification on formatted calls
//! - Message suppression via ignore-lists
//! - Error extraction and counting
//! - Level filtering and record shape
//! - Reconfiguration via update()

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use logfacade::sinks::MemorySink;
use logfacade::{fields, Config, Logger, SimpleErrorCounter, TimeFormat, Traced, Value};

fn capture_logger(level: &str) -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_level(level)
        .with_no_buffer();
    (Logger::new(cfg, &[]), sink)
}

#[derive(Debug)]
struct StackedError {
    msg: &'static str,
}

impl fmt::Display for StackedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl StdError for StackedError {}

impl Traced for StackedError {
    fn stack_trace(&self) -> String {
        "frame 0: make_request\nframe 1: main".to_string()
    }
}

#[test]
fn test_logger_initialization() {
    let (logger, _sink) = capture_logger("debug");
    assert!(!logger.not_inited());

    let placeholder = Logger::default();
    assert!(placeholder.not_inited());
}

#[test]
fn test_logger_info() {
    let (logger, sink) = capture_logger("debug");

    logger.info("test message", &[]);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "info");
    assert_eq!(records[0]["message"], "test message");
    assert!(records[0]["time"].is_string());
}

#[test]
fn test_logger_with_fields() {
    let (base, sink) = capture_logger("debug");
    let logger = base.with_fields(&fields!["foo", "bar"]);

    logger.info("test message", &fields!["key", "value"]);

    let records = sink.records();
    assert_eq!(records[0]["foo"], "bar");
    assert_eq!(records[0]["key"], "value");
    assert_eq!(records[0]["message"], "test message");
}

#[test]
fn test_fields_round_trip() {
    let (logger, sink) = capture_logger("debug");

    logger.info(
        "typed fields",
        &fields!["s", "text", "i", -3_i64, "u", 7_u64, "f", 2.5_f64, "b", true],
    );

    let record = &sink.records()[0];
    assert_eq!(record["s"], "text");
    assert_eq!(record["i"], -3);
    assert_eq!(record["u"], 7);
    assert_eq!(record["f"], 2.5);
    assert_eq!(record["b"], true);
}

#[test]
fn test_ignore_messages() {
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_level("debug")
        .with_no_buffer()
        .with_ignore(["ignore me"]);
    let logger = Logger::new(cfg, &[]);

    logger.info("this should be logged", &[]);
    logger.info("ignore me", &[]);
    logger.warn("please ignore me today", &[]);

    let contents = sink.contents();
    assert!(contents.contains("this should be logged"));
    assert!(!contents.contains("ignore me"));
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_ignore_drops_counter_increment() {
    let counter = Arc::new(SimpleErrorCounter::new());
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_no_buffer()
        .with_error_counter(counter.clone())
        .with_ignore(["suppressed"]);
    let logger = Logger::new(cfg, &[]);

    let io_err = io::Error::new(io::ErrorKind::Other, "disk gone");
    logger.err(Some(&io_err), "suppressed failure", &[]);

    assert!(sink.is_empty());
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_error_counter() {
    let counter = Arc::new(SimpleErrorCounter::new());
    let cfg = Config::new()
        .with_error_counter(counter.clone())
        .with_level("error");
    let logger = Logger::new(cfg, &[]);

    assert_eq!(counter.count(), 0);

    let err = io::Error::new(io::ErrorKind::Other, "error occurred");
    logger.err(Some(&err), "error test", &[]);
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_counter_counts_level_filtered_errors() {
    // the counter tracks logged error values independent of logging output
    let counter = Arc::new(SimpleErrorCounter::new());
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_level("fatal")
        .with_no_buffer()
        .with_error_counter(counter.clone());
    let logger = Logger::new(cfg, &[]);

    let err = io::Error::new(io::ErrorKind::Other, "quiet failure");
    logger.err(Some(&err), "below the gate", &[]);

    assert!(sink.is_empty());
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_logger_panic() {
    let counter = Arc::new(SimpleErrorCounter::new());
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_level("debug")
        .with_no_buffer()
        .with_error_counter(counter.clone());
    let logger = Logger::new(cfg, &[]);

    let result = catch_unwind(AssertUnwindSafe(|| logger.panic("panic message")));

    let payload = result.unwrap_err();
    let text = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default();
    assert!(text.contains("panic message"));

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "fatal");
    assert_eq!(records[0]["message"], "panic message");
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_panic_suppressed_message_still_panics() {
    let counter = Arc::new(SimpleErrorCounter::new());
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_no_buffer()
        .with_error_counter(counter.clone())
        .with_ignore(["quiet"]);
    let logger = Logger::new(cfg, &[]);

    let result = catch_unwind(AssertUnwindSafe(|| logger.panic("quiet crash")));

    assert!(result.is_err());
    assert!(sink.is_empty());
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_logger_debug_warn_error() {
    let (logger, sink) = capture_logger("debug");

    logger.debug("debug message", &[]);
    logger.warn("warn message", &[]);
    logger.error("error message", &[]);

    let records = sink.records();
    assert_eq!(records[0]["level"], "debug");
    assert_eq!(records[1]["level"], "warn");
    assert_eq!(records[2]["level"], "error");
}

#[test]
fn test_level_filtering() {
    let (logger, sink) = capture_logger("warn");

    logger.debug("x", &[]);
    assert!(sink.is_empty());

    logger.warn("y", &[]);
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "warn");
    assert_eq!(records[0]["message"], "y");
}

#[test]
fn test_update_configuration() {
    let first = MemorySink::new();
    let second = MemorySink::new();

    let mut logger = Logger::new(
        Config::new()
            .with_sink(first.clone())
            .with_level("info")
            .with_no_buffer(),
        &[],
    );
    logger.info("initial config message", &[]);
    assert!(first.contents().contains("initial config message"));

    logger.update(
        Config::new()
            .with_sink(second.clone())
            .with_level("debug")
            .with_no_buffer(),
        &[],
    );
    logger.debug("updated config message", &[]);

    assert!(second.contents().contains("updated config message"));
    assert!(!first.contents().contains("updated config message"));
    assert_eq!(first.len(), 1);
}

#[test]
fn test_infof_with_trailing_fields() {
    let (logger, sink) = capture_logger("info");

    logger.infof("test message %d", &fields![42_i64, "a", "b"]);

    let records = sink.records();
    assert_eq!(records[0]["level"], "info");
    assert_eq!(records[0]["message"], "test message 42");
    assert_eq!(records[0]["a"], "b");
}

#[test]
fn test_debugf() {
    let (logger, sink) = capture_logger("debug");

    logger.debugf("debug value: %v", &fields![100_i64]);

    let records = sink.records();
    assert_eq!(records[0]["level"], "debug");
    assert_eq!(records[0]["message"], "debug value: 100");
}

#[test]
fn test_no_placeholders_all_args_are_fields() {
    let (logger, sink) = capture_logger("info");

    logger.infof("plain message", &fields!["k", "v", "n", 1_i64]);

    let records = sink.records();
    assert_eq!(records[0]["message"], "plain message");
    assert_eq!(records[0]["k"], "v");
    assert_eq!(records[0]["n"], 1);
}

#[test]
fn test_errf() {
    let (logger, sink) = capture_logger("error");

    let err = io::Error::new(io::ErrorKind::Other, "123");
    logger.errf(Some(&err), "error operation %s", &fields!["failed", "a", "b"]);

    let records = sink.records();
    assert_eq!(records[0]["level"], "error");
    assert_eq!(records[0]["message"], "error operation failed");
    assert_eq!(records[0]["error"], "123");
    assert_eq!(records[0]["a"], "b");
}

#[test]
fn test_errorf() {
    let (logger, sink) = capture_logger("error");

    logger.errorf("error operation %s", &fields!["failed"]);

    let records = sink.records();
    assert_eq!(records[0]["level"], "error");
    assert_eq!(records[0]["message"], "error operation failed");
}

#[test]
fn test_error_extraction_from_field_list() {
    let counter = Arc::new(SimpleErrorCounter::new());
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_no_buffer()
        .with_error_counter(counter.clone());
    let logger = Logger::new(cfg, &[]);

    let err = io::Error::new(io::ErrorKind::Other, "some error");
    logger.info(
        "scan finds it",
        &fields!["k1", "v1", "error", Value::error(&err), "k2", "v2"],
    );

    let records = sink.records();
    assert_eq!(records[0]["error"], "some error");
    assert_eq!(records[0]["k1"], "v1");
    assert_eq!(records[0]["k2"], "v2");
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_nil_error_logged_as_null() {
    let counter = Arc::new(SimpleErrorCounter::new());
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_no_buffer()
        .with_error_counter(counter.clone());
    let logger = Logger::new(cfg, &[]);

    logger.err(None, "nothing failed", &[]);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].as_object().unwrap().contains_key("error"));
    assert!(records[0]["error"].is_null());
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_stack_trace_capture() {
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_no_buffer()
        .with_stack_trace();
    let logger = Logger::new(cfg, &[]);

    let err = io::Error::new(io::ErrorKind::Other, "deep failure");
    logger.err(Some(&err), "with stack", &[]);

    let records = sink.records();
    assert_eq!(records[0]["error"], "deep failure");
    let stack = records[0]["stack"].as_str().unwrap();
    assert!(!stack.is_empty());
}

#[test]
fn test_traced_error_keeps_its_own_stack() {
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_no_buffer()
        .with_stack_trace();
    let logger = Logger::new(cfg, &[]);

    let err = StackedError { msg: "request failed" };
    logger.err_traced(&err, "with pre-captured stack", &[]);

    let records = sink.records();
    assert_eq!(records[0]["error"], "request failed");
    assert_eq!(records[0]["stack"], "frame 0: make_request\nframe 1: main");
}

#[test]
fn test_stack_disabled_by_default() {
    let (logger, sink) = capture_logger("error");

    let err = io::Error::new(io::ErrorKind::Other, "flat failure");
    logger.err(Some(&err), "no stack wanted", &[]);

    assert!(!sink.records()[0]
        .as_object()
        .unwrap()
        .contains_key("stack"));
}

#[test]
fn test_err_stack_message_contains_trace() {
    let (logger, sink) = capture_logger("error");

    let err = io::Error::new(io::ErrorKind::Other, "stack trace test error");
    logger.err_stack(&err, &fields!["additional", "info"]);

    let records = sink.records();
    let message = records[0]["message"].as_str().unwrap();
    assert!(message.starts_with("stack trace test error\n"));
    assert_eq!(records[0]["additional"], "info");
}

#[test]
fn test_odd_field_list_pairs_null() {
    let (logger, sink) = capture_logger("info");

    logger.info("odd", &fields!["a", 1_i64, "dangling"]);

    let record = &sink.records()[0];
    assert_eq!(record["a"], 1);
    assert!(record["dangling"].is_null());
}

#[test]
fn test_identical_configs_produce_identical_records() {
    let sink_a = MemorySink::new();
    let sink_b = MemorySink::new();
    let build = |sink: &MemorySink| {
        Logger::new(
            Config::new().with_sink(sink.clone()).with_no_buffer(),
            &fields!["app", "twin"],
        )
    };

    build(&sink_a).info("same message", &fields!["k", "v"]);
    build(&sink_b).info("same message", &fields!["k", "v"]);

    let line_a = sink_a.lines()[0].clone();
    let line_b = sink_b.lines()[0].clone();
    assert!(line_a.starts_with("{\"level\":\"info\",\"time\":\""));
    assert!(line_b.starts_with("{\"level\":\"info\",\"time\":\""));

    let mut parsed_a: serde_json::Value = serde_json::from_str(&line_a).unwrap();
    let mut parsed_b: serde_json::Value = serde_json::from_str(&line_b).unwrap();
    parsed_a.as_object_mut().unwrap().remove("time");
    parsed_b.as_object_mut().unwrap().remove("time");
    assert_eq!(parsed_a, parsed_b);
}

#[test]
fn test_multi_sink_fan_out() {
    let first = MemorySink::new();
    let second = MemorySink::new();
    let cfg = Config::new()
        .with_sink(first.clone())
        .with_sink(second.clone())
        .with_no_buffer();
    let logger = Logger::new(cfg, &[]);

    logger.info("both targets", &[]);

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first.lines()[0], second.lines()[0]);
}

#[test]
fn test_buffered_logging_drains() {
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_buffer_capacity(100)
        .with_flush_interval(Duration::from_millis(5));
    let logger = Logger::new(cfg, &[]);

    for i in 0..20 {
        logger.infof("message %d", &fields![i as i64]);
    }

    // the buffered worker needs a moment to drain
    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(sink.len(), 20);
    drop(logger);
}

#[test]
fn test_time_format_unix() {
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_no_buffer()
        .with_time_format(TimeFormat::UnixMillis);
    let logger = Logger::new(cfg, &[]);

    logger.info("numeric time", &[]);

    assert!(sink.records()[0]["time"].is_i64());
}

#[test]
fn test_trace_attaches_caller() {
    let (logger, sink) = capture_logger("trace");

    logger.trace("entering", &[]);

    let records = sink.records();
    assert_eq!(records[0]["level"], "trace");
    let caller = records[0]["caller"].as_str().unwrap();
    assert!(caller.contains("logger_tests.rs"));
}

#[test]
fn test_info_has_no_caller() {
    let (logger, sink) = capture_logger("debug");
    logger.info("plain", &[]);
    assert!(!sink.records()[0].as_object().unwrap().contains_key("caller"));
}

#[test]
fn test_print_has_no_level() {
    let (logger, sink) = capture_logger("info");

    logger.print("log without level");

    let records = sink.records();
    assert!(!records[0].as_object().unwrap().contains_key("level"));
    assert_eq!(records[0]["message"], "log without level");
}

#[test]
fn test_printf() {
    let (logger, sink) = capture_logger("info");

    logger.printf("log without level %s", &fields!["status"]);

    let records = sink.records();
    assert_eq!(records[0]["message"], "log without level status");
}

#[test]
fn test_disabled_level_discards_everything() {
    let sink = MemorySink::new();
    let cfg = Config::new()
        .with_sink(sink.clone())
        .with_level("disabled")
        .with_no_buffer();
    let logger = Logger::new(cfg, &[]);

    logger.error("nothing", &[]);
    logger.print("nothing either");

    assert!(sink.is_empty());
}

#[test]
fn test_bound_fields_precede_call_fields() {
    let sink = MemorySink::new();
    let cfg = Config::new().with_sink(sink.clone()).with_no_buffer();
    let logger = Logger::new(cfg, &fields!["service", "api"]);

    logger.info("request", &fields!["path", "/health"]);

    let line = &sink.lines()[0];
    let service_at = line.find("\"service\"").unwrap();
    let path_at = line.find("\"path\"").unwrap();
    assert!(service_at < path_at);
}

#[test]
fn test_file_sink_end_to_end() {
    use logfacade::sinks::WriterSink;
    use std::fs;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.jsonl");

    let cfg = Config::new()
        .with_sink(WriterSink::file(&path).unwrap())
        .with_no_buffer();
    let logger = Logger::new(cfg, &[]);

    logger.info("to disk", &fields!["n", 1_i64]);
    drop(logger);

    let content = fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(parsed["message"], "to disk");
    assert_eq!(parsed["n"], 1);
}
