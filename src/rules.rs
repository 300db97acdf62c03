//! File-type classification: ordered rules mapping paths to loader pipelines.

use log::debug;
use regex::Regex;

use crate::config::BuildConfig;
use crate::error::ResolveError;
use crate::models::{PipelineStep, StyleFallback};

/// Byte threshold below which image assets are inlined as data URIs.
pub const IMAGE_INLINE_THRESHOLD_BYTES: u64 = 8192;

/// Directory copied image assets are emitted into, relative to the output dir.
pub const IMAGE_OUTPUT_DIR: &str = "images/";

/// A single pattern-to-pipeline mapping, evaluated in declaration order.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Short identifier used in logs and CLI output.
    pub name: String,
    pattern: Regex,
    include_dir: Option<String>,
    exclude_dir: Option<String>,
    /// Ordered transformation steps applied to matched files.
    pub pipeline: Vec<PipelineStep>,
}

impl Rule {
    /// Create a rule from a user-supplied pattern.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        pipeline: Vec<PipelineStep>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            include_dir: None,
            exclude_dir: None,
            pipeline,
        })
    }

    fn builtin(name: &str, pattern: &str, pipeline: Vec<PipelineStep>) -> Self {
        Self {
            name: name.to_string(),
            pattern: Regex::new(pattern).expect("invalid built-in rule pattern"),
            include_dir: None,
            exclude_dir: None,
            pipeline,
        }
    }

    /// Restrict the rule to paths containing the given directory component.
    pub fn include_dir(mut self, dir: impl Into<String>) -> Self {
        self.include_dir = Some(dir.into());
        self
    }

    /// Reject paths containing the given directory component.
    pub fn exclude_dir(mut self, dir: impl Into<String>) -> Self {
        self.exclude_dir = Some(dir.into());
        self
    }

    /// Whether this rule claims the given (normalised) path.
    fn matches(&self, path: &str) -> bool {
        if !self.pattern.is_match(path) {
            return false;
        }
        if let Some(dir) = &self.exclude_dir {
            if path_has_component(path, dir) {
                return false;
            }
        }
        if let Some(dir) = &self.include_dir {
            if !path_has_component(path, dir) {
                return false;
            }
        }
        true
    }
}

/// Ordered rule list with first-match-wins semantics.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    passthrough: Option<Rule>,
}

impl RuleSet {
    /// The built-in classifications, in required precedence order.
    pub fn builtin(config: &BuildConfig) -> Self {
        let stylesheet_base = vec![
            PipelineStep::ExtractToFile {
                fallback: StyleFallback::InlineStyle,
            },
            PipelineStep::CssTransform,
            PipelineStep::PostcssTransform,
        ];

        let mut less_pipeline = stylesheet_base.clone();
        less_pipeline.push(PipelineStep::LessTransform);
        let mut sass_pipeline = stylesheet_base.clone();
        sass_pipeline.push(PipelineStep::SassTransform);

        let rules = vec![
            Rule::builtin("css", r"\.css$", stylesheet_base),
            Rule::builtin("less", r"\.less$", less_pipeline),
            Rule::builtin("scss", r"\.scss$", sass_pipeline),
            Rule::builtin("ecmascript", r"\.js$", vec![PipelineStep::EcmascriptTranspile])
                .include_dir(&config.source_dir)
                .exclude_dir(&config.vendored_dir),
            Rule::builtin("image", r"\.(jpe?g|png|gif)$", vec![PipelineStep::InlineOrCopy {
                threshold_bytes: IMAGE_INLINE_THRESHOLD_BYTES,
                output_dir: IMAGE_OUTPUT_DIR.to_string(),
            }]),
            Rule::builtin("html", r"\.(htm|html)$", vec![
                PipelineStep::RewriteEmbeddedImageReferences,
            ]),
            Rule::builtin("font", r"\.(eot|ttf|woff|svg)$", vec![
                PipelineStep::CopyVerbatimWithContentHashName,
            ]),
        ];

        let passthrough = config.allow_passthrough.then(|| {
            Rule::builtin("passthrough", r".", vec![PipelineStep::PassThrough])
        });

        Self { rules, passthrough }
    }

    /// Return the first rule whose pattern matches the file path.
    ///
    /// Falls back to the pass-through rule when one is configured; otherwise
    /// an unmatched path is a classification failure for that module.
    pub fn classify(&self, file_path: &str) -> Result<&Rule, ResolveError> {
        let normalised = file_path.replace('\\', "/");

        for rule in &self.rules {
            if rule.matches(&normalised) {
                debug!("classified {file_path} under rule {}", rule.name);
                return Ok(rule);
            }
        }

        match &self.passthrough {
            Some(rule) => {
                debug!("no rule matched {file_path}; passing through");
                Ok(rule)
            }
            None => Err(ResolveError::NoMatchingRule {
                path: file_path.to_string(),
            }),
        }
    }
}

fn path_has_component(path: &str, dir: &str) -> bool {
    path.split('/').any(|component| component == dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> RuleSet {
        RuleSet::builtin(&BuildConfig::default())
    }

    fn pipeline_of(rules: &RuleSet, path: &str) -> Vec<PipelineStep> {
        rules.classify(path).expect("expected a matching rule").pipeline.clone()
    }

    #[test]
    fn css_maps_to_extract_css_postcss_in_order() {
        assert_eq!(pipeline_of(&builtin(), "src/styles/main.css"), vec![
            PipelineStep::ExtractToFile {
                fallback: StyleFallback::InlineStyle
            },
            PipelineStep::CssTransform,
            PipelineStep::PostcssTransform,
        ]);
    }

    #[test]
    fn less_and_scss_append_their_preprocessor_step() {
        let rules = builtin();

        let less = pipeline_of(&rules, "src/theme.less");
        assert_eq!(less.last(), Some(&PipelineStep::LessTransform));
        assert_eq!(less.len(), 4);

        let scss = pipeline_of(&rules, "src/theme.scss");
        assert_eq!(scss.last(), Some(&PipelineStep::SassTransform));
        assert_eq!(scss.len(), 4);
    }

    #[test]
    fn stylesheets_never_receive_script_or_image_pipelines() {
        let rules = builtin();
        for path in ["a.css", "b.less", "c.scss"] {
            let pipeline = pipeline_of(&rules, path);
            assert!(!pipeline.contains(&PipelineStep::EcmascriptTranspile));
            assert!(!pipeline.iter().any(|step| matches!(
                step,
                PipelineStep::InlineOrCopy { .. }
            )));
        }
    }

    #[test]
    fn project_scripts_are_transpiled() {
        assert_eq!(pipeline_of(&builtin(), "src/app.js"), vec![
            PipelineStep::EcmascriptTranspile
        ]);
        assert_eq!(pipeline_of(&builtin(), "src/redux/actions/user.js"), vec![
            PipelineStep::EcmascriptTranspile
        ]);
    }

    #[test]
    fn vendored_scripts_fail_classification_by_default() {
        let err = builtin()
            .classify("node_modules/react/index.js")
            .expect_err("vendored scripts are excluded from transpilation");
        assert!(matches!(err, ResolveError::NoMatchingRule { ref path }
            if path == "node_modules/react/index.js"));
    }

    #[test]
    fn vendored_scripts_pass_through_when_fallback_is_configured() {
        let config = BuildConfig {
            allow_passthrough: true,
            ..BuildConfig::default()
        };
        let rules = RuleSet::builtin(&config);

        let rule = rules
            .classify("node_modules/react/index.js")
            .expect("fallback rule should claim vendored scripts");
        assert_eq!(rule.pipeline, vec![PipelineStep::PassThrough]);
    }

    #[test]
    fn vendored_directory_is_matched_by_component_not_substring() {
        let rules = builtin();
        // A directory merely containing the name must not trip the exclusion.
        assert_eq!(pipeline_of(&rules, "src/node_modules_shim/app.js"), vec![
            PipelineStep::EcmascriptTranspile
        ]);
        assert!(rules.classify("src/node_modules/lib/app.js").is_err());
    }

    #[test]
    fn images_use_the_inline_or_copy_policy() {
        let rules = builtin();
        for path in ["img/a.jpg", "img/b.jpeg", "img/c.png", "img/d.gif"] {
            assert_eq!(pipeline_of(&rules, path), vec![PipelineStep::InlineOrCopy {
                threshold_bytes: IMAGE_INLINE_THRESHOLD_BYTES,
                output_dir: IMAGE_OUTPUT_DIR.to_string(),
            }]);
        }
    }

    #[test]
    fn html_documents_get_reference_rewriting() {
        let rules = builtin();
        for path in ["src/index.html", "src/legacy.htm"] {
            assert_eq!(pipeline_of(&rules, path), vec![
                PipelineStep::RewriteEmbeddedImageReferences
            ]);
        }
    }

    #[test]
    fn fonts_are_copied_with_hashed_names() {
        let rules = builtin();
        for path in ["fonts/a.eot", "fonts/b.ttf", "fonts/c.woff", "icons/d.svg"] {
            assert_eq!(pipeline_of(&rules, path), vec![
                PipelineStep::CopyVerbatimWithContentHashName
            ]);
        }
    }

    #[test]
    fn unknown_extensions_fail_without_fallback() {
        let err = builtin().classify("data/records.bin").expect_err("no rule matches");
        assert!(matches!(err, ResolveError::NoMatchingRule { .. }));
    }

    #[test]
    fn classification_is_deterministic() {
        let rules = builtin();
        let first = rules.classify("src/app.js").unwrap().name.clone();
        let second = rules.classify("src/app.js").unwrap().name.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn backslash_paths_are_normalised_before_matching() {
        assert_eq!(pipeline_of(&builtin(), r"src\pages\home.js"), vec![
            PipelineStep::EcmascriptTranspile
        ]);
    }
}
