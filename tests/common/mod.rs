use pl0::mach::{compile, Compiled, Event, Runtime};

/// Compile, tolerating diagnostics. Panics only on a fatal abort.
pub fn build(source: &str) -> Compiled {
    match compile(source) {
        Ok(compiled) => compiled,
        Err(error) => panic!("{} : {:?}", error, error),
    }
}

/// Compile expecting a clean program, ready to run.
pub fn runtime(source: &str) -> Runtime {
    let compiled = build(source);
    if !compiled.errors.is_empty() {
        panic!("unexpected diagnostics: {:?}", compiled.errors);
    }
    Runtime::new(compiled.code)
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_with_input(runtime, &[])
}

/// Drive the event loop to completion, feeding `inputs` one line per
/// Input event and collecting everything the program prints. Faults
/// are collected as their display text.
pub fn exec_with_input(runtime: &mut Runtime, inputs: &[&str]) -> String {
    let mut inputs = inputs.iter();
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(5000);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    s.push_str(&format!("{}\n", error));
                }
            }
            Event::Running => {
                if prev_running {
                    s.push_str("\nExecution cycles exceeded.\n");
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(ps);
            }
            Event::Input => match inputs.next() {
                Some(line) => runtime.input(line),
                None => panic!("program wants more input than the test supplies"),
            },
        }
        prev_running = matches!(event, Event::Running);
    }
    s
}
