use clap::ValueEnum;

use triage_pipeline::OnExists;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum OnExistsFlag {
    Skip,
    Overwrite,
    Suffix,
}

impl OnExistsFlag {
    pub(crate) const fn as_domain(self) -> OnExists {
        match self {
            OnExistsFlag::Skip => OnExists::Skip,
            OnExistsFlag::Overwrite => OnExists::Overwrite,
            OnExistsFlag::Suffix => OnExists::Suffix,
        }
    }
}
