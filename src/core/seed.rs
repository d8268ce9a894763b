//! Built-in sample pipeline used when no pipeline file is given

use crate::core::{
    job::{Job, JobType, BRANCH, LANGUAGE, REPO_URL},
    pipeline::Pipeline,
    stage::Stage,
};

/// The six-stage sample pipeline: source, test, build, scan, upload, deploy
pub fn sample_pipeline() -> Pipeline {
    let source = Stage::new("stage-source", "源")
        .with_job(source_job(
            "job-source-1",
            "gitee-go/spring-boot",
            "Java",
            "https://gitee.com/gitee-go/spring-boot.git",
        ))
        .with_job(source_job(
            "job-source-2",
            "gitee-go/golang-build-case",
            "Golang",
            "https://gitee.com/gitee-go/golang-build-case.git",
        ));

    let test = Stage::new("stage-test", "测试")
        .parallel()
        .with_job(Job::new("job-maven-test", "Maven 单元测试", JobType::Test))
        .with_job(Job::new("job-golang-test", "Golang 单元测试", JobType::Test))
        .with_job(Job::new("job-jacoco", "Jacoco 覆盖率采集", JobType::Test));

    let build = Stage::new("stage-build", "构建")
        .with_job(Job::new("job-maven-build", "Maven 构建", JobType::Build));

    let scan = Stage::new("stage-custom-1", "阶段1")
        .with_job(Job::new("job-sbom", "SBOM 扫描", JobType::Scan));

    let upload = Stage::new("stage-upload", "上传")
        .with_job(Job::new("job-upload", "上传制品", JobType::Deploy));

    let deploy = Stage::new("stage-deploy", "发布")
        .parallel()
        .with_job(Job::new("job-deploy", "发布", JobType::Deploy));

    Pipeline::with_stages(
        "pipeline-202212141737",
        "流水线-202212141737",
        vec![source, test, build, scan, upload, deploy],
    )
}

fn source_job(id: &str, name: &str, language: &str, repo_url: &str) -> Job {
    Job::new(id, name, JobType::Source)
        .with_description("master")
        .with_config(LANGUAGE, language)
        .with_config(REPO_URL, repo_url)
        .with_config(BRANCH, "master")
}
