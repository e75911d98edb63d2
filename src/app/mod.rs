pub mod report;

pub use report::{
    common_facility_report, common_ixp_report, missing_ixp_report, OutputFormat, Report,
};
