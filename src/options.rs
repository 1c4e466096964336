use std::path::PathBuf;

use must::Policy;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "must", author = "devpts00", about = "File utility that stops at the first failure")]
pub struct Options {
    #[structopt(short, long, default_value = "2", help = "Verbosity level from 0 to 5")]
    pub verbose: u8,

    #[structopt(
        short,
        long,
        default_value = "exit",
        help = "What to do on failure: 'exit' prints the error and exits, 'panic' unwinds"
    )]
    pub policy: Policy,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    #[structopt(about = "Print files to stdout")]
    Cat {
        #[structopt(parse(from_os_str), required = true)]
        paths: Vec<PathBuf>,
    },

    #[structopt(about = "Copy a file")]
    Cp {
        #[structopt(parse(from_os_str))]
        src: PathBuf,
        #[structopt(parse(from_os_str))]
        dst: PathBuf,
        #[structopt(long, help = "Sync the copy to disk before exiting")]
        sync: bool,
    },

    #[structopt(about = "Rename a file or directory")]
    Mv {
        #[structopt(parse(from_os_str))]
        src: PathBuf,
        #[structopt(parse(from_os_str))]
        dst: PathBuf,
    },

    #[structopt(about = "Remove files or empty directories")]
    Rm {
        #[structopt(parse(from_os_str), required = true)]
        paths: Vec<PathBuf>,
    },

    #[structopt(about = "List a directory")]
    Ls {
        #[structopt(parse(from_os_str), default_value = ".")]
        dir: PathBuf,
    },

    #[structopt(about = "Show size, kind and modification time")]
    Stat {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
    },

    #[structopt(about = "Shrink or extend an existing file")]
    Truncate {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
        #[structopt(help = "New size in bytes")]
        size: String,
    },

    #[structopt(about = "Rewrite a stream of JSON documents one per line")]
    Json {
        #[structopt(parse(from_os_str))]
        path: PathBuf,
    },

    #[structopt(about = "Create a temporary file or directory and print its path")]
    Mktemp {
        #[structopt(short, long, help = "Create a directory")]
        directory: bool,
        #[structopt(long, parse(from_os_str), help = "Parent directory, the system one by default")]
        tmpdir: Option<PathBuf>,
        #[structopt(default_value = "tmp.*", help = "Name pattern, the last '*' is replaced")]
        pattern: String,
    },
}
