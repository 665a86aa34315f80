#![deny(missing_docs)]

//! # Generator
//!
//! Handles the invocation of the external code generator that turns
//! protobuf schemas into Go sources.
//!
//! Wraps `protoc` with the Go plugin. The generator's output is not
//! inspected; only the exit status decides success.

use crate::error::{CliError, CliResult};
use std::path::Path;
use std::process::{Command, Output};

/// Interface for executing the generation command.
///
/// Abstracted to allow mocking command execution in tests without requiring `protoc` to be installed.
pub trait CommandExecutor {
    /// Executes the command and returns the output.
    fn execute(&self, program: &str, args: &[&str]) -> CliResult<Output>;
}

/// Standard executor using `std::process::Command`.
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn execute(&self, program: &str, args: &[&str]) -> CliResult<Output> {
        let output = Command::new(program).args(args).output()?;
        Ok(output)
    }
}

/// Produces sources from one schema file.
pub trait SchemaGenerator {
    /// Generates code for `schema`, resolving imports against `include_dir`
    /// and writing into `out_dir`. Returns the generator's combined output.
    fn generate(&self, schema: &Path, include_dir: &Path, out_dir: &Path) -> CliResult<String>;
}

/// `protoc` with the Go plugin.
pub struct ProtocGenerator<E> {
    program: String,
    go_out_options: String,
    executor: E,
}

impl<E: CommandExecutor> ProtocGenerator<E> {
    /// Creates a generator running `program` with `--go_out=<go_out_options>:<dir>`.
    pub fn new(program: impl Into<String>, go_out_options: impl Into<String>, executor: E) -> Self {
        Self {
            program: program.into(),
            go_out_options: go_out_options.into(),
            executor,
        }
    }

    fn go_out(&self, out_dir: &Path) -> String {
        if self.go_out_options.is_empty() {
            format!("--go_out={}", out_dir.display())
        } else {
            format!("--go_out={}:{}", self.go_out_options, out_dir.display())
        }
    }
}

impl<E: CommandExecutor> SchemaGenerator for ProtocGenerator<E> {
    fn generate(&self, schema: &Path, include_dir: &Path, out_dir: &Path) -> CliResult<String> {
        // usage: protoc -I=<include> <schema> --go_out=<opts>:<out>
        let include = format!("-I={}", include_dir.display());
        let schema_arg = schema.to_string_lossy();
        let go_out = self.go_out(out_dir);

        let args = vec![include.as_str(), &*schema_arg, go_out.as_str()];
        let cmd_result = self.executor.execute(&self.program, &args)?;

        let mut output = String::from_utf8_lossy(&cmd_result.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&cmd_result.stderr));

        if !cmd_result.status.success() {
            return Err(CliError::Subprocess {
                program: self.program.clone(),
                status: cmd_result.status,
                output,
            });
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    // Mock Executor to capture commands
    struct MockExecutor {
        last_command: RefCell<Option<(String, Vec<String>)>>,
        should_fail: bool,
    }

    impl MockExecutor {
        fn new(should_fail: bool) -> Self {
            Self {
                last_command: RefCell::new(None),
                should_fail,
            }
        }
    }

    impl CommandExecutor for MockExecutor {
        fn execute(&self, program: &str, args: &[&str]) -> CliResult<Output> {
            self.last_command.borrow_mut().replace((
                program.to_string(),
                args.iter().map(|s| s.to_string()).collect(),
            ));

            let status = if self.should_fail {
                // exit code 1 in wait(2) encoding
                ExitStatus::from_raw(1 << 8)
            } else {
                ExitStatus::from_raw(0)
            };

            Ok(Output {
                status,
                stdout: b"generated\n".to_vec(),
                stderr: if self.should_fail {
                    b"Mock Error".to_vec()
                } else {
                    Vec::new()
                },
            })
        }
    }

    #[test]
    fn test_generate_builds_protoc_arguments() {
        let generator = ProtocGenerator::new("protoc", "plugins=grpc", MockExecutor::new(false));
        let schema = Path::new("/work/staging/orders/orders.proto");
        let base = Path::new("/work/staging");

        let out = generator.generate(schema, base, base).unwrap();
        assert_eq!(out, "generated\n");

        let (prog, args) = generator.executor.last_command.take().unwrap();
        assert_eq!(prog, "protoc");
        assert_eq!(
            args,
            vec![
                "-I=/work/staging".to_string(),
                "/work/staging/orders/orders.proto".to_string(),
                "--go_out=plugins=grpc:/work/staging".to_string(),
            ]
        );
    }

    #[test]
    fn test_generate_without_plugin_options() {
        let generator = ProtocGenerator::new("protoc", "", MockExecutor::new(false));
        let base = Path::new("/work");
        generator.generate(Path::new("/work/a.proto"), base, base).unwrap();

        let (_, args) = generator.executor.last_command.take().unwrap();
        assert_eq!(args[2], "--go_out=/work");
    }

    #[test]
    fn test_generate_failure() {
        let generator = ProtocGenerator::new("protoc", "plugins=grpc", MockExecutor::new(true));
        let base = Path::new("/work");

        let res = generator.generate(Path::new("/work/a.proto"), base, base);

        match res.unwrap_err() {
            CliError::Subprocess {
                program, output, ..
            } => {
                assert_eq!(program, "protoc");
                assert!(output.contains("generated"));
                assert!(output.contains("Mock Error"));
            }
            other => panic!("Wrong error type: {}", other),
        }
    }

    #[test]
    fn test_shell_executor_structure() {
        // "echo" stands in for protoc; on systems without it the IO error path is exercised.
        let exec = ShellExecutor;
        match exec.execute("echo", &["test"]) {
            Ok(output) => assert!(output.status.success()),
            Err(err) => assert!(matches!(err, CliError::Io(_))),
        }
    }
}
