//! Phishing website detection toolkit.
//!
//! The pieces mirror the system's moving parts: a popup-style scan
//! controller ([`popup`]), the prediction API client ([`api`]), the feature
//! risk catalog ([`features`]), an offline demo simulator ([`demo`]), the
//! tab tracker stdio protocol ([`tracker`]), the local scan log
//! ([`history`]), static model figures ([`report`]), and the embedded web
//! dashboard ([`web`]).

pub mod api;
pub mod cli;
pub mod config;
pub mod demo;
pub mod features;
pub mod history;
pub mod popup;
pub mod report;
pub mod tracker;
pub mod web;
