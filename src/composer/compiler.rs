use std::{
    io::Write,
    process::{
        Command,
        Stdio,
    },
    thread,
};

use crate::core::{
    BuildConfig,
    CardError,
    CommandSpec,
    Snippet,
};

/// Turns snippet source into the script text that gets embedded in a document.
pub trait SnippetCompiler: Send + Sync {
    fn compile(&self, snippet: &Snippet) -> Result<String, CardError>;
}

/// Embeds sources unchanged, for snippets already written as browser script.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl SnippetCompiler for Verbatim {
    fn compile(&self, snippet: &Snippet) -> Result<String, CardError> {
        Ok(snippet.source.clone())
    }
}

/// Pipes the source through an external program (a TypeScript transpiler, a minifier) and
/// embeds whatever it prints.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    spec: CommandSpec,
}

impl CommandCompiler {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

impl SnippetCompiler for CommandCompiler {
    fn compile(&self, snippet: &Snippet) -> Result<String, CardError> {
        let failed = |reason: String| CardError::Compile { snippet: snippet.display_name(), reason };

        let mut child = Command::new(&self.spec.program)
            .args(&self.spec.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("could not start {}: {}", self.spec.program, e)))?;

        // The child may fill its stdout pipe before it has read all of stdin
        let mut stdin =
            child.stdin.take().ok_or_else(|| failed("stdin was not captured".to_string()))?;
        let source = snippet.source.clone();
        let writer = thread::spawn(move || stdin.write_all(source.as_bytes()));

        let output = child.wait_with_output().map_err(|e| failed(e.to_string()))?;
        let written = writer.join();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!(
                "{} exited with {}: {}",
                self.spec.program,
                output.status,
                stderr.trim()
            )));
        }
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(failed(format!("could not write source: {}", e))),
            Err(_) => return Err(failed("stdin writer panicked".to_string())),
        }

        String::from_utf8(output.stdout).map_err(|e| failed(format!("output is not UTF-8: {}", e)))
    }
}

pub fn compiler_for(config: &BuildConfig) -> Box<dyn SnippetCompiler> {
    match &config.compiler {
        Some(spec) => Box::new(CommandCompiler::new(spec.clone())),
        None => Box::new(Verbatim),
    }
}
