//! `adrm standards`: write one standards document.
use super::context::RunContext;
use crate::cli::StandardsArgs;
use crate::files::LocalFileHandler;
use crate::standards::{FileSystemStandardsGenerator, StandardsGenerator};
use crate::util::relative_display;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::{self, Read};

pub fn run_standards(args: &StandardsArgs) -> Result<()> {
    let ctx = RunContext::load_from_cwd(args.config.as_deref())?;
    let content = match &args.content_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read content file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("read standards content from stdin")?;
            buf
        }
    };
    if content.trim().is_empty() {
        return Err(anyhow!("no standards content provided"));
    }

    let handler = LocalFileHandler::default();
    let generator = FileSystemStandardsGenerator::new(&ctx.config, &ctx.working_dir, &handler)?;
    let path = generator.create(args.kind, &args.technology, &content)?;
    println!("wrote {}", relative_display(&path, &ctx.working_dir));
    Ok(())
}
