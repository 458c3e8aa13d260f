//! Sample target module for scenario tests
//!
//! Registers the `unload_targets` module image and writes its on-disk
//! artifact to a shared temp directory. The target types cover every shape
//! the harness has to handle: overloads, defaults, non-public methods,
//! throwing and asynchronous bodies, record parameters, and a body that
//! deliberately keeps its context alive.

use crate::harness::api::TargetFault;
use crate::module::api::{
    ContextRetainer, InvocationScope, MethodDecl, MethodReturn, ModuleImage, ParamDecl, ParamType,
    TypeDecl, Value,
};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

pub(crate) const TARGET_TYPE: &str = "Targets.SimpleTarget";
pub(crate) const OPTIONS_TYPE: &str = "Targets.OptionsTarget";
pub(crate) const OPTIONS_RECORD: &str = "Targets.WorkOptions";

static ARTIFACT: Lazy<(tempfile::TempDir, PathBuf)> = Lazy::new(|| {
    let dir = tempfile::tempdir().expect("temp dir for target artifact");
    let path = dir.path().join("unload_targets.plugin");
    std::fs::write(&path, b"unloadcheck test target artifact\n").expect("write artifact");
    (dir, path)
});

/// Path to the on-disk artifact of the sample target module
pub(crate) fn target_module_path() -> String {
    ARTIFACT.1.display().to_string()
}

// Retainer stashed by the leaky body; mimics a plugin parking context-rooted
// state in a global.
static LEAKED: Mutex<Option<ContextRetainer>> = Mutex::new(None);

pub(crate) fn release_leaked() {
    *LEAKED.lock().unwrap() = None;
}

fn int_arg(args: &[Option<Value>], index: usize) -> Result<i64, TargetFault> {
    match args.get(index) {
        Some(Some(Value::Int(v))) => Ok(*v),
        other => Err(TargetFault::new(format!(
            "expected int at position {index}, got {other:?}"
        ))),
    }
}

fn text_arg(args: &[Option<Value>], index: usize) -> Result<String, TargetFault> {
    match args.get(index) {
        Some(Some(Value::Text(s))) => Ok(s.clone()),
        other => Err(TargetFault::new(format!(
            "expected string at position {index}, got {other:?}"
        ))),
    }
}

fn no_args(
    _scope: &InvocationScope<'_>,
    _args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    Ok(MethodReturn::Unit)
}

fn one_arg_int(
    _scope: &InvocationScope<'_>,
    args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    let x = int_arg(args, 0)?;
    Ok(MethodReturn::Value(Value::Int(x)))
}

fn one_arg_text(
    _scope: &InvocationScope<'_>,
    args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    text_arg(args, 0)?;
    Ok(MethodReturn::Unit)
}

fn two_args(
    _scope: &InvocationScope<'_>,
    args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    int_arg(args, 0)?;
    text_arg(args, 1)?;
    Ok(MethodReturn::Unit)
}

// Declared defaults would be (5, "ok"); the harness must synthesize the zero
// value and absent instead. The body checks exactly that shape.
fn defaults(
    _scope: &InvocationScope<'_>,
    args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    match args {
        [Some(Value::Int(0)), None] => Ok(MethodReturn::Unit),
        other => Err(TargetFault::new(format!(
            "expected synthesized (0, absent), got {other:?}"
        ))),
    }
}

fn throwing(
    _scope: &InvocationScope<'_>,
    _args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    Err(TargetFault::new("Boom"))
}

fn hidden(
    _scope: &InvocationScope<'_>,
    args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    int_arg(args, 0)?;
    Ok(MethodReturn::Unit)
}

fn async_work(
    _scope: &InvocationScope<'_>,
    args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    let x = int_arg(args, 0)?;
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(2));
        let _ = tx.send(Ok(Some(Value::Int(x * 2))));
    });
    Ok(MethodReturn::Pending(rx))
}

fn async_throwing(
    _scope: &InvocationScope<'_>,
    args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    int_arg(args, 0)?;
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(2));
        let _ = tx.send(Err(TargetFault::new("AsyncBoom")));
    });
    Ok(MethodReturn::Pending(rx))
}

fn leaky(
    scope: &InvocationScope<'_>,
    _args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    *LEAKED.lock().unwrap() = Some(scope.retain());
    Ok(MethodReturn::Unit)
}

fn run_with_options(
    scope: &InvocationScope<'_>,
    args: &[Option<Value>],
) -> Result<MethodReturn, TargetFault> {
    match args.first() {
        Some(None) | None => Ok(MethodReturn::Unit),
        Some(Some(Value::Record(record)))
            if record.identity.qualified_name == OPTIONS_RECORD
                && record.identity.context_id == scope.context_id() =>
        {
            Ok(MethodReturn::Unit)
        }
        other => Err(TargetFault::new(format!(
            "options not bound to this context: {other:?}"
        ))),
    }
}

fn public_method(name: &str, params: Vec<ParamDecl>, body: crate::module::api::MethodBody) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        is_public: true,
        params,
        body,
    }
}

fn unload_targets_image() -> ModuleImage {
    ModuleImage {
        name: "unload_targets".to_string(),
        types: vec![
            TypeDecl {
                qualified_name: TARGET_TYPE.to_string(),
                methods: vec![
                    public_method("no_args", Vec::new(), no_args),
                    public_method("one_arg", vec![ParamDecl::new("x", ParamType::Int)], one_arg_int),
                    public_method("one_arg", vec![ParamDecl::new("s", ParamType::Text)], one_arg_text),
                    public_method(
                        "two_args",
                        vec![
                            ParamDecl::new("x", ParamType::Int),
                            ParamDecl::new("y", ParamType::Text),
                        ],
                        two_args,
                    ),
                    public_method(
                        "defaults",
                        vec![
                            ParamDecl::new("x", ParamType::Int),
                            ParamDecl::new("y", ParamType::Text),
                        ],
                        defaults,
                    ),
                    public_method("throwing", vec![ParamDecl::new("x", ParamType::Int)], throwing),
                    MethodDecl {
                        name: "hidden".to_string(),
                        is_public: false,
                        params: vec![ParamDecl::new("x", ParamType::Int)],
                        body: hidden,
                    },
                    public_method(
                        "async_work",
                        vec![ParamDecl::new("x", ParamType::Int)],
                        async_work,
                    ),
                    public_method(
                        "async_throwing",
                        vec![ParamDecl::new("x", ParamType::Int)],
                        async_throwing,
                    ),
                    public_method("leaky", vec![ParamDecl::new("x", ParamType::Int)], leaky),
                ],
            },
            TypeDecl {
                qualified_name: OPTIONS_TYPE.to_string(),
                methods: vec![public_method(
                    "run_with_options",
                    vec![ParamDecl::new(
                        "options",
                        ParamType::Record(OPTIONS_RECORD.to_string()),
                    )],
                    run_with_options,
                )],
            },
        ],
    }
}

crate::module_image!(unload_targets_image);
