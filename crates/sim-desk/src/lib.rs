#![deny(warnings)]

//! The president's desk: approval documents with a hidden truth layer,
//! office visitors, and the verdict engine that turns decisions into
//! consequences.
//!
//! The desk owns only its own state ([`DeskState`]). Company-wide effects
//! of a decision come back as outcome records ([`VerdictResolution`],
//! [`VisitorResolution`]) for the orchestrator to apply, and condition
//! checks read a [`CompanyView`] snapshot the orchestrator rebuilds per
//! call. Hidden document fields never cross the presentation boundary:
//! [`DocumentView`] structurally omits them.

pub mod balance;
pub mod document;
pub mod generator;
pub mod state;
pub mod templates;
pub mod verdict;
pub mod visitor;

pub use balance::DeskBalance;
pub use document::{
    ApprovalDocument, DocumentCategory, DocumentClue, DocumentNature, DocumentOutcome,
    DocumentView, Priority, TrapKind, Verdict,
};
pub use generator::{generate_documents, generate_in_category};
pub use state::{
    CompanyView, DeskState, DocumentStats, EmployeeRef, PendingCausalEffect, PendingPayout,
};
pub use verdict::{
    complete_investigations, long_term_payouts, process_causal_chains, process_expired,
    process_verdict, VerdictResolution,
};
pub use visitor::{
    respond_to_visitor, spawn_visitor, ResponseEffects, ResponseTone, SpecialEffect,
    VisitorEvent, VisitorMood, VisitorProfile, VisitorResolution, VisitorResponse, VisitorType,
};
