//! Build step: layout skeleton + shared snippet + side snippet -> one document per side.

use std::{
    fs,
    path::Path,
    time::Instant,
};

use rayon::prelude::*;
use tracing::{
    debug,
    info,
};

use crate::{
    core::{
        BuildConfig,
        CardError,
        FinishedDocument,
        Side,
        Snippet,
        SnippetKind,
    },
    persistence::write_atomic,
};

pub mod compiler;
pub mod skeleton;

pub use compiler::{
    compiler_for,
    CommandCompiler,
    SnippetCompiler,
    Verbatim,
};
pub use skeleton::{
    Skeleton,
    SHARED_MARKER,
    SIDE_MARKER,
};

/// Compiles both snippets and substitutes them into the skeleton.
pub fn compose(
    skeleton: &Skeleton,
    shared: &Snippet,
    specific: &Snippet,
    compiler: &dyn SnippetCompiler,
) -> Result<String, CardError> {
    let shared_script = compiler.compile(shared)?;
    debug!("Compiled {} ({} bytes)", shared.display_name(), shared_script.len());
    let side_script = compiler.compile(specific)?;
    debug!("Compiled {} ({} bytes)", specific.display_name(), side_script.len());

    Ok(skeleton.fill(&shared_script, &side_script))
}

fn read_input(path: &Path) -> Result<String, CardError> {
    fs::read_to_string(path).map_err(|e| CardError::FailedToRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Reads one side's inputs and composes its document in memory.
pub fn compose_side(
    config: &BuildConfig,
    side: Side,
    compiler: &dyn SnippetCompiler,
) -> Result<FinishedDocument, CardError> {
    let skeleton = Skeleton::parse(read_input(&config.skeleton_path(side))?)?;

    let shared_path = config.shared_snippet_path();
    let shared = Snippet::new(SnippetKind::Shared, &shared_path, read_input(&shared_path)?);

    let side_path = config.side_snippet_path(side);
    let specific = Snippet::new(SnippetKind::SideSpecific(side), &side_path, read_input(&side_path)?);

    let content = compose(&skeleton, &shared, &specific, compiler)?;
    Ok(FinishedDocument { side, output_path: config.output_path(side), content })
}

/// Composes one side and writes it. Nothing is written unless composition succeeded.
pub fn build_side(
    config: &BuildConfig,
    side: Side,
    compiler: &dyn SnippetCompiler,
) -> Result<FinishedDocument, CardError> {
    let document = compose_side(config, side, compiler)?;
    write_atomic(&document.output_path, &document.content)?;
    info!("Generated {}", document.output_path.display());
    Ok(document)
}

/// Builds every side. Sides are independent, so one side's failure does not stop the other
/// from being written; the first error is returned.
pub fn build_all(
    config: &BuildConfig,
    compiler: &dyn SnippetCompiler,
) -> Result<Vec<FinishedDocument>, CardError> {
    let start = Instant::now();
    info!("Building card templates in {}", config.root.display());

    let documents = Side::ALL
        .as_slice()
        .par_iter()
        .map(|&side| build_side(config, side, compiler))
        .collect::<Vec<_>>()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    info!("Templates built ({:.2}s)", start.elapsed().as_secs_f32());
    Ok(documents)
}

/// Composes every side without writing anything.
pub fn check_all(
    config: &BuildConfig,
    compiler: &dyn SnippetCompiler,
) -> Result<Vec<FinishedDocument>, CardError> {
    Side::ALL.as_slice().par_iter().map(|&side| compose_side(config, side, compiler)).collect()
}
