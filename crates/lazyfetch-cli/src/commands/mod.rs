mod describe;
mod rewrite;

use crate::Cli;
use crate::CommandResult;
use describe::DescribeCmd;
use rewrite::RewriteCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "lazyfetch")]
pub(crate) enum CommandEnum {
    /// Mark one-to-one and many-to-one associations lazy.
    Rewrite(Box<RewriteCmd>),

    /// Print what the `rewrite` recipe does.
    Describe(DescribeCmd),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Rewrite(cmd) => cmd.run(cli).await,
            Self::Describe(cmd) => cmd.run(cli).await,
        }
    }
}
