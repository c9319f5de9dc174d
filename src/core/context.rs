use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use glob::Pattern;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::LanguageSet,
};

/// Resolved settings shared (read-only) by every task of a command.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--languages ENG,CHT`)
/// 2. `.uixmlrc.json` config file
/// 3. Built-in defaults
///
/// Relative paths resolve against the directory holding the config file, or
/// the working directory when there is none.
#[derive(Debug)]
pub struct ProjectContext {
    pub config: Config,
    pub languages: LanguageSet,
    pub document_pattern: Pattern,
    pub root: PathBuf,
    pub verbose: bool,
}

impl ProjectContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let start_dir = std::env::current_dir().context("Failed to get current directory")?;
        let loaded = load_config(&start_dir)?;
        let mut config = loaded.config;

        if !args.languages.is_empty() {
            config.languages = args.languages.clone();
        }
        let overrides = [
            (&args.input_root, &mut config.input_root),
            (&args.template_root, &mut config.template_root),
            (&args.output_root, &mut config.output_root),
            (&args.properties_root, &mut config.properties_root),
            (&args.workbook, &mut config.workbook),
        ];
        for (arg, setting) in overrides {
            if let Some(path) = arg {
                *setting = path.to_string_lossy().into_owned();
            }
        }

        if args.verbose && loaded.from_file {
            eprintln!("Using config from {}", loaded.root.display());
        }

        Self::from_config(config, loaded.root, args.verbose)
    }

    pub fn from_config(config: Config, root: PathBuf, verbose: bool) -> Result<Self> {
        config.validate()?;
        let languages = config.language_set()?;
        let document_pattern = Pattern::new(&config.document_pattern)?;
        Ok(Self {
            config,
            languages,
            document_pattern,
            root,
            verbose,
        })
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    pub fn input_root(&self) -> PathBuf {
        self.resolve(&self.config.input_root)
    }

    pub fn template_root(&self) -> PathBuf {
        self.resolve(&self.config.template_root)
    }

    pub fn output_root(&self) -> PathBuf {
        self.resolve(&self.config.output_root)
    }

    pub fn properties_root(&self) -> PathBuf {
        self.resolve(&self.config.properties_root)
    }

    pub fn workbook_path(&self) -> PathBuf {
        self.resolve(&self.config.workbook)
    }

    pub fn template_path(&self, language: &str, document: &str) -> PathBuf {
        document_path(&self.template_root(), language, document, "xml")
    }

    pub fn output_path(&self, language: &str, document: &str) -> PathBuf {
        document_path(&self.output_root(), language, document, "xml")
    }

    pub fn properties_path(&self, language: &str, document: &str) -> PathBuf {
        document_path(&self.properties_root(), language, document, "properties")
    }
}

fn document_path(root: &Path, language: &str, document: &str, extension: &str) -> PathBuf {
    root.join(language).join(format!("{}.{}", document, extension))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_paths_resolve_against_root() {
        let ctx =
            ProjectContext::from_config(Config::default(), PathBuf::from("/project"), false)
                .unwrap();

        assert_eq!(
            ctx.template_path("CHT", "login"),
            PathBuf::from("/project/./uixml/template/CHT/login.xml")
        );
        assert_eq!(
            ctx.properties_path("ENG", "login"),
            PathBuf::from("/project/./properties/ENG/login.properties")
        );
        assert_eq!(ctx.languages.len(), 3);
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = Config {
            workbook: "/data/labels.json".to_string(),
            ..Config::default()
        };
        let ctx = ProjectContext::from_config(config, PathBuf::from("/project"), false).unwrap();
        assert_eq!(ctx.workbook_path(), PathBuf::from("/data/labels.json"));
    }

    #[test]
    fn test_invalid_languages_rejected() {
        let config = Config {
            languages: vec!["ENG".to_string(), "ENG".to_string()],
            ..Config::default()
        };
        assert!(ProjectContext::from_config(config, PathBuf::from("/project"), false).is_err());
    }
}
