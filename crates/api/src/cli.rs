//! Command line definitions for the `academy` binary.

use std::path::PathBuf;

use academy_domain::Subject;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "academy",
    version,
    about = "Reconcile enrollment class names and student statuses",
    long_about = "Reconcile enrollment class names against the active class catalog and keep\n\
                  each student's status in line with their enrollments."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Read configuration from this JSON or TOML file instead of the
    /// environment and the default search paths.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List enrollments whose class name is not an active class.
    Scan {
        /// Only scan enrollments of this subject.
        #[arg(long)]
        subject: Option<Subject>,
    },

    /// Rename the class of one enrollment, or of every fix in a JSON file.
    Fix {
        /// Enrollment to fix, as STUDENT_ID/ENROLLMENT_ID.
        #[arg(value_name = "ENROLLMENT", required_unless_present = "file")]
        enrollment: Option<String>,

        /// Replacement class name.
        #[arg(value_name = "CLASS_NAME", required_unless_present = "file")]
        class_name: Option<String>,

        /// JSON array of `{ "enrollment": {..}, "new_class_name": ".." }`.
        #[arg(long, value_name = "PATH", conflicts_with_all = ["enrollment", "class_name"])]
        file: Option<PathBuf>,
    },

    /// Delete enrollments.
    Delete {
        /// Enrollments to delete, as STUDENT_ID/ENROLLMENT_ID.
        #[arg(value_name = "ENROLLMENT", required = true)]
        enrollments: Vec<String>,
    },

    /// Recompute one student's status.
    Sync {
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,
    },

    /// Recompute every student's status.
    SyncAll,

    /// Put enrollments on hold (or release them) and recompute the status.
    Hold {
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,

        #[arg(value_name = "ENROLLMENT_ID", required = true)]
        enrollment_ids: Vec<String>,

        /// Release the hold instead of setting it.
        #[arg(long)]
        release: bool,
    },

    /// Check database and catalog health.
    Health,
}
