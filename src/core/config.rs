//! Pipeline and editor configuration from YAML

use crate::core::{Pipeline, Stage};
use crate::editor::store::EditorDefaults;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A pipeline as written in a YAML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline identifier (falls back to the name)
    #[serde(default)]
    pub id: Option<String>,

    /// Pipeline name
    pub name: String,

    /// Stages in display order
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the pipeline configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Pipeline name must not be empty");
        }

        let mut stage_ids = HashSet::new();
        let mut job_ids = HashSet::new();

        for stage in &self.stages {
            if stage.id.is_empty() {
                anyhow::bail!("Stage '{}' has an empty ID", stage.name);
            }
            if !stage_ids.insert(stage.id.as_str()) {
                anyhow::bail!("Duplicate stage ID: {}", stage.id);
            }

            // Job IDs are unique across the whole pipeline, not per stage
            for job in &stage.jobs {
                if job.id.is_empty() {
                    anyhow::bail!("Job '{}' in stage '{}' has an empty ID", job.name, stage.id);
                }
                if !job_ids.insert(job.id.as_str()) {
                    anyhow::bail!("Duplicate job ID: {} (in stage '{}')", job.id, stage.id);
                }
            }
        }

        Ok(())
    }

    /// Convert to a pipeline value
    pub fn to_pipeline(&self) -> Pipeline {
        let id = self.id.clone().unwrap_or_else(|| self.name.clone());
        Pipeline::with_stages(id, self.name.clone(), self.stages.iter().cloned())
    }

    /// Build a config from an existing pipeline
    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        Self {
            id: Some(pipeline.id.clone()),
            name: pipeline.name.clone(),
            stages: pipeline.stages.iter().map(|s| s.as_ref().clone()).collect(),
        }
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// How new stage and job IDs are generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStyle {
    /// Random `stage-xxxxxxxx` / `job-xxxxxxxx`
    #[default]
    Uuid,
    /// Counting `stage-1`, `job-1`, ...
    Sequential,
}

/// Editor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Names and descriptions given to new stages and jobs
    #[serde(default)]
    pub defaults: EditorDefaults,

    /// ID generation style
    #[serde(default)]
    pub id_style: IdStyle,
}

impl EditorConfig {
    /// Load editor settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse editor settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JobType;

    #[test]
    fn test_parse_pipeline() {
        let yaml = r#"
id: "pipeline-demo"
name: "Demo"
stages:
  - id: "stage-source"
    name: "Source"
    jobs:
      - id: "job-src"
        name: "repo"
        type: SOURCE
        description: "main"
        config:
          repoUrl: "https://example.com/repo.git"
          branch: "main"
  - id: "stage-test"
    name: "Test"
    isParallel: true
    jobs:
      - id: "job-unit"
        name: "Unit tests"
        type: TEST
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        let pipeline = config.to_pipeline();

        assert_eq!(pipeline.id, "pipeline-demo");
        assert_eq!(pipeline.stages.len(), 2);
        assert!(pipeline.stages[1].is_parallel());

        let job = pipeline.find_job("job-src").unwrap();
        assert_eq!(job.job_type, JobType::Source);
        assert_eq!(job.config_value("branch"), "main");
    }

    #[test]
    fn test_id_falls_back_to_name() {
        let config = PipelineConfig::from_yaml("name: \"Empty\"\n").unwrap();
        let pipeline = config.to_pipeline();
        assert_eq!(pipeline.id, "Empty");
        assert!(pipeline.stages.is_empty());
    }

    #[test]
    fn test_duplicate_job_across_stages_rejected() {
        let yaml = r#"
name: "Dupes"
stages:
  - id: "a"
    name: "A"
    jobs:
      - { id: "job-1", name: "one", type: BUILD }
  - id: "b"
    name: "B"
    jobs:
      - { id: "job-1", name: "again", type: DEPLOY }
"#;

        let err = PipelineConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate job ID: job-1"));
    }

    #[test]
    fn test_duplicate_stage_rejected() {
        let yaml = r#"
name: "Dupes"
stages:
  - { id: "a", name: "A" }
  - { id: "a", name: "A again" }
"#;

        let err = PipelineConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate stage ID: a"));
    }

    #[test]
    fn test_unknown_job_type_rejected() {
        let yaml = r#"
name: "Bad"
stages:
  - id: "a"
    name: "A"
    jobs:
      - { id: "job-1", name: "one", type: LINT }
"#;

        assert!(PipelineConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip_of_sample() {
        let pipeline = crate::core::seed::sample_pipeline();
        let yaml = PipelineConfig::from_pipeline(&pipeline).to_yaml().unwrap();
        let reloaded = PipelineConfig::from_yaml(&yaml).unwrap().to_pipeline();
        assert_eq!(reloaded, pipeline);
    }

    #[test]
    fn test_job_icon_kept_through_loader() {
        let yaml = r#"
name: "Icons"
stages:
  - id: "stage-build"
    name: "Build"
    jobs: [{ id: j, name: n, type: BUILD, icon: hammer }]
"#;
        let pipeline = PipelineConfig::from_yaml(yaml).unwrap().to_pipeline();
        assert_eq!(pipeline.find_job("j").unwrap().icon.as_deref(), Some("hammer"));

        let out = PipelineConfig::from_pipeline(&pipeline).to_yaml().unwrap();
        assert!(out.contains("icon: hammer"));
    }

    #[test]
    fn test_editor_config_defaults() {
        let config = EditorConfig::from_yaml("id_style: sequential\n").unwrap();
        assert_eq!(config.id_style, IdStyle::Sequential);
        assert_eq!(config.defaults.job_name, "新任务");

        let config = EditorConfig::from_yaml(
            "defaults:\n  stage_name_prefix: \"Stage\"\n",
        )
        .unwrap();
        assert_eq!(config.id_style, IdStyle::Uuid);
        assert_eq!(config.defaults.stage_name_prefix, "Stage");
        assert_eq!(config.defaults.job_description, "Pending configuration");
    }
}
