use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::manifest::DocumentManifest;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Render {
            manifest,
            output: target,
        }) => {
            let settings = load_settings(cli)?;
            let mut stdout = io::stdout().lock();
            if let Some(path) = render(manifest, target.as_deref(), &settings, &mut stdout)? {
                output::success(&format!("wrote {}", path.display()));
            }
            Ok(())
        }
        Some(Commands::Outline { manifest }) => {
            let mut stdout = io::stdout().lock();
            outline(manifest, &mut stdout)
        }
        Some(Commands::Completion { shell }) => {
            completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage("no command given, see --help".into())),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let local_dir = cli
        .config_dir
        .clone()
        .or_else(|| std::env::current_dir().ok());
    Ok(Settings::load(local_dir.as_deref())?)
}

/// Renders `manifest` to `output`, the configured output directory, or `stdout`.
///
/// Returns the file written, None when rendered to `stdout`.
#[instrument(skip(settings, stdout))]
pub fn render<W: Write>(
    manifest: &Path,
    output: Option<&Path>,
    settings: &Settings,
    stdout: &mut W,
) -> CliResult<Option<PathBuf>> {
    let tree = DocumentManifest::load(manifest)?.build()?;
    let root = tree.root();

    let target = output
        .map(Path::to_path_buf)
        .or_else(|| settings.output_path_for(manifest));
    debug!("render target: {:?}", target);

    match target {
        Some(path) => {
            let write_err = |source| CliError::Write {
                path: path.clone(),
                source,
            };
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
            let mut file = fs::File::create(&path).map_err(write_err)?;
            tree.write(root, &mut file).map_err(write_err)?;
            Ok(Some(path))
        }
        None => {
            tree.write(root, stdout).map_err(|source| CliError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
            Ok(None)
        }
    }
}

#[instrument(skip(stdout))]
pub fn outline<W: Write>(manifest: &Path, stdout: &mut W) -> CliResult<()> {
    let tree = DocumentManifest::load(manifest)?.build()?;
    let text = tree.to_tree_string(tree.root()).to_string();
    stdout
        .write_all(text.as_bytes())
        .map_err(|source| CliError::Write {
            path: PathBuf::from("<stdout>"),
            source,
        })
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
