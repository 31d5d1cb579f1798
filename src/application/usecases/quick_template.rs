//! 빠른 스캔 템플릿 유스케이스.

use anyhow::Result;

use crate::application::ports::{Prompter, Reporter};
use crate::domain::catalog::{self, QUICK_TEMPLATES, QuickTemplate};
use crate::domain::target::TargetSpec;

pub struct QuickTemplateUseCase<'a> {
    pub prompter: &'a dyn Prompter,
    pub reporter: &'a dyn Reporter,
}

impl QuickTemplateUseCase<'_> {
    /// 템플릿과 대상을 골라 완성된 명령을 돌려준다.
    /// `/quick <n> <target>`처럼 인자가 주어지면 해당 프롬프트를 건너뛴다.
    /// 반환값은 `(command, target)`이며 사용자가 빠져나가면 `None`.
    pub fn execute(
        &self,
        preset_index: Option<usize>,
        preset_target: Option<&str>,
    ) -> Result<Option<(String, String)>> {
        let Some(template) = self.resolve_template(preset_index)? else {
            return Ok(None);
        };

        let Some(target) = self.resolve_target(template, preset_target)? else {
            return Ok(None);
        };

        let command = template.render(&target);
        Ok(Some((command, target)))
    }

    fn resolve_template(&self, preset: Option<usize>) -> Result<Option<&'static QuickTemplate>> {
        if let Some(index) = preset {
            if let Some(template) = catalog::quick_template(index) {
                return Ok(Some(template));
            }
            self.reporter.status(
                "template",
                &format!("unknown template {index}; pick one below"),
            );
        }

        self.reporter.section("QUICK SCAN TEMPLATES");
        for (idx, template) in QUICK_TEMPLATES.iter().enumerate() {
            self.reporter.raw(&format!(
                "{}. {:<22} - {}",
                idx + 1,
                template.name,
                template.description
            ));
        }

        loop {
            let Some(input) = self
                .prompter
                .line("Select template [1-8] or Enter to return: ")?
            else {
                return Ok(None);
            };

            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }

            if let Ok(choice) = trimmed.parse::<usize>()
                && let Some(template) = catalog::quick_template(choice)
            {
                return Ok(Some(template));
            }

            self.reporter.raw("Invalid choice. Please select 1-8.");
        }
    }

    fn resolve_target(
        &self,
        template: &QuickTemplate,
        preset: Option<&str>,
    ) -> Result<Option<String>> {
        if let Some(raw) = preset {
            match TargetSpec::parse(raw) {
                Ok(_) => return Ok(Some(raw.trim().to_string())),
                Err(err) => self.reporter.status("target", &format!("rejected: {err:#}")),
            }
        }

        let prompt = format!("Enter target for '{}': ", template.name);
        loop {
            let Some(input) = self.prompter.line(&prompt)? else {
                return Ok(None);
            };

            if input.trim().is_empty() {
                return Ok(None);
            }

            match TargetSpec::parse(&input) {
                Ok(spec) => {
                    let target = input.trim().to_string();
                    self.reporter
                        .status("target", &format!("{target} ({})", spec.kind()));
                    return Ok(Some(target));
                }
                Err(err) => self.reporter.raw(&format!("Invalid target: {err:#}")),
            }
        }
    }
}
