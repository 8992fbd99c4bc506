//! AuraMatch - Personality-Profile Partner Readings
//!
//! This crate collects a self-reported personality profile through a
//! multi-step form and asks a hosted generative model for either an ideal
//! partner archetype (with portrait) or a compatibility reading against a
//! named partner.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
