use clap::Parser;
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(
    name = "tiny",
    about = "Shrink JPEG and PNG files in place with tinyjpg.com",
    long_about = "tiny uploads each image to the tinyjpg.com optimizer, keeps a copy of the \
                  original next to it as <name>_original.<ext>, and replaces the file with the \
                  optimized version. Only files ending in jpg, jpeg or png are processed.",
    version,
    after_help = "EXAMPLES:\n  \
    tiny cat.png dog.jpg\n  \
    tiny .\n  \
    tiny --no-backup ./photos"
)]
pub struct Args {
    #[arg(
        value_name = "PATH",
        help = "Image files, or a single folder",
        long_help = "Image files to shrink, or one folder whose images (not subfolders) are shrunk. \
                     When the first path is a folder the remaining paths are ignored."
    )]
    pub paths: Vec<OsString>,

    #[arg(
        long,
        help = "Do not keep a <name>_original copy",
        long_help = "Replace images without first copying them to <name>_original.<ext>."
    )]
    pub no_backup: bool,

    #[arg(short = 'q', long, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Log every request and stage")]
    pub verbose: bool,
}
