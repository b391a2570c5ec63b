mod jam;
mod jam_claim;
mod jam_review;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "jamguide",
    "m0001",
    vec_box![],
    vec_box![
        jam::CreateTable,
        jam::CreateStatusIdx,
        jam_review::CreateTable,
        jam_review::CreateJamIdx,
        jam_claim::CreateTable,
        jam_claim::CreateStatusIdx
    ]
);
