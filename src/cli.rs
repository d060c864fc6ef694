use clap::Parser;
use std::path::PathBuf;

use crate::scope::ScopeFlags;

/// Install KernelSpec for sos Kernel
#[derive(Parser, Debug, Default)]
#[command(name = "sos-notebook-install", version)]
pub struct Cli {
    /// Install KernelSpec in user homedirectory
    #[arg(long, group = "location")]
    pub user: bool,

    /// Install KernelSpec in sys.prefix. Useful in conda / virtualenv
    #[arg(long = "sys-prefix", group = "location")]
    pub sys_prefix: bool,

    /// Install KernelSpec in this prefix
    #[arg(long, value_name = "PREFIX", group = "location")]
    pub prefix: Option<PathBuf>,
}

impl Cli {
    pub fn scope_flags(&self) -> ScopeFlags {
        ScopeFlags {
            user: self.user,
            sys_prefix: self.sys_prefix,
            prefix: self.prefix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sos-notebook-install").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_flags() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.scope_flags(), ScopeFlags::default());
    }

    #[test]
    fn test_single_flags() {
        assert!(parse(&["--user"]).unwrap().user);
        assert!(parse(&["--sys-prefix"]).unwrap().sys_prefix);
        assert_eq!(
            parse(&["--prefix", "/srv/jupyter"]).unwrap().prefix,
            Some(PathBuf::from("/srv/jupyter"))
        );
    }

    #[test]
    fn test_flags_are_mutually_exclusive() {
        for args in [
            &["--user", "--sys-prefix"][..],
            &["--user", "--prefix", "/srv"][..],
            &["--sys-prefix", "--prefix", "/srv"][..],
        ] {
            let err = parse(args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict, "{args:?}");
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = parse(&["--global"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_prefix_requires_value() {
        assert!(parse(&["--prefix"]).is_err());
    }
}
