use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use lazyfetch::LazyAssociations;
use lazyfetch::LazyAssociationsConfig;
use lazyfetch::PersistenceNamespace;

#[derive(Debug, clap::Args)]
pub(crate) struct DescribeCmd {
    #[arg(
        default_value_t=PersistenceNamespace::Jakarta,
        help="Package family of the persistence annotations: `jakarta` or \
             `javax`.",
        long,
    )]
    namespace: PersistenceNamespace,
}

#[inherent::inherent]
impl RunnableCommand for DescribeCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let recipe = LazyAssociations::new(LazyAssociationsConfig {
            namespace: self.namespace,
            ..LazyAssociationsConfig::default()
        });
        let targets = recipe.targets();
        CommandResult::success(format_args!(
            concat!(
                "{} ({})\n",
                "  {}\n",
                "  * Rewrites `@{}` and `@{}`.\n",
                "  * Sets `fetch` to `{}.LAZY`.\n",
                "  * Resolves names against {} known types.",
            ),
            recipe.display_name(),
            recipe.name(),
            recipe.description(),
            targets.one_to_one,
            targets.many_to_one,
            targets.fetch_type,
            recipe.catalog().len(),
        ))
    }
}
