//! mha-failover - master IP failover / online change script for MHA
//!
//! Called by the MHA manager around a master switch with
//! `--command=status|stop|stopssh|start` and a description of the old and
//! new masters. Demotes the old master (`read_only=ON`) during a planned
//! switch and opens the new master for writes (`read_only=OFF`) on
//! promotion.

pub mod cli;
pub mod config;
pub mod failover;
pub mod observability;
