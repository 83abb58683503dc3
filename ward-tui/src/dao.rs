//! DAO view: wallet-gated vote and proposal-submission attestations.
//! Votes are signed messages recorded in local view state only; nothing
//! is broadcast or persisted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use ward_core::models::{Proposal, ProposalStatus, VoteChoice};

use crate::wallet::{Wallet, WalletError};

pub const MIN_PROPOSAL_VOTING_POWER: u64 = 1_000;
/// Voting power granted in demo mode, when no governance mint is
/// configured to check a real balance against.
pub const DEMO_VOTING_POWER: u64 = 1_000;

#[derive(Debug, Clone, Default)]
pub struct ProposalForm {
    pub title: String,
    pub category: String,
    pub description: String,
}

impl ProposalForm {
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.category.is_empty() && !self.description.is_empty()
    }

    pub fn clear(&mut self) {
        *self = ProposalForm::default();
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded,
    Cancelled,
    Failed(String),
    NotEligible(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Cancelled,
    Failed(String),
    NotEligible(String),
}

pub struct DaoState {
    pub proposals: Vec<Proposal>,
    pub votes: HashMap<u64, VoteChoice>,
    pub voting_power: u64,
    pub selected: usize,
    pub form: ProposalForm,
    pub status: Option<String>,
}

impl DaoState {
    pub fn new(voting_power: u64) -> Self {
        Self {
            proposals: seed_proposals(),
            votes: HashMap::new(),
            voting_power,
            selected: 0,
            form: ProposalForm::default(),
            status: None,
        }
    }

    pub fn select_next(&mut self) {
        if !self.proposals.is_empty() {
            self.selected = (self.selected + 1) % self.proposals.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.proposals.is_empty() {
            self.selected = (self.selected + self.proposals.len() - 1) % self.proposals.len();
        }
    }
}

pub fn vote_message(
    proposal: &Proposal,
    choice: VoteChoice,
    voting_power: u64,
    wallet: &str,
    timestamp: DateTime<Utc>,
) -> String {
    format!(
        "Ward AI DAO Vote\n\nProposal ID: {}\nProposal: {}\n\nYour Vote: {}\nVoting Power: {} WARD\nWallet: {}\n\nTimestamp: {}",
        proposal.id,
        proposal.title,
        choice.as_str(),
        voting_power,
        wallet,
        timestamp.to_rfc3339(),
    )
}

pub fn submission_message(
    form: &ProposalForm,
    voting_power: u64,
    wallet: &str,
    timestamp: DateTime<Utc>,
) -> String {
    format!(
        "Ward AI DAO - New Proposal Submission\n\nTitle: {}\nCategory: {}\nDescription: {}\n\nSubmitted by: {}\nVoting Power: {} WARD\nTimestamp: {}",
        form.title,
        form.category,
        form.description,
        wallet,
        voting_power,
        timestamp.to_rfc3339(),
    )
}

/// Sign-and-record. The signature is an attestation only; tallies on the
/// proposal itself are not mutated.
pub fn cast_vote(
    state: &mut DaoState,
    wallet: &dyn Wallet,
    proposal_id: u64,
    choice: VoteChoice,
    now: DateTime<Utc>,
) -> VoteOutcome {
    if !wallet.connected() || state.voting_power == 0 {
        return VoteOutcome::NotEligible(
            "Connect a wallet holding WARD tokens to vote".to_string(),
        );
    }
    let Some(pubkey) = wallet.pubkey() else {
        return VoteOutcome::NotEligible("Wallet has no public key".to_string());
    };
    let Some(proposal) = state.proposals.iter().find(|p| p.id == proposal_id) else {
        return VoteOutcome::Failed(format!("Unknown proposal {proposal_id}"));
    };

    let message = vote_message(proposal, choice, state.voting_power, &pubkey.to_string(), now);

    match wallet.sign_message(message.as_bytes()) {
        Ok(_signature) => {
            state.votes.insert(proposal_id, choice);
            VoteOutcome::Recorded
        }
        Err(WalletError::UserCancelled) => VoteOutcome::Cancelled,
        Err(WalletError::Transport(reason)) => VoteOutcome::Failed(reason),
    }
}

/// Signs a submission attestation and clears the form. The proposal is
/// not appended to the active list; it goes to off-screen review.
pub fn submit_proposal(
    state: &mut DaoState,
    wallet: &dyn Wallet,
    now: DateTime<Utc>,
) -> SubmitOutcome {
    if !wallet.connected() || state.voting_power == 0 {
        return SubmitOutcome::NotEligible(
            "Connect a wallet holding WARD tokens to submit".to_string(),
        );
    }
    if !state.form.is_complete() {
        return SubmitOutcome::NotEligible("Fill in all proposal fields".to_string());
    }
    if state.voting_power < MIN_PROPOSAL_VOTING_POWER {
        return SubmitOutcome::NotEligible(format!(
            "Requires at least {MIN_PROPOSAL_VOTING_POWER} WARD to submit a proposal"
        ));
    }
    let Some(pubkey) = wallet.pubkey() else {
        return SubmitOutcome::NotEligible("Wallet has no public key".to_string());
    };

    let message = submission_message(&state.form, state.voting_power, &pubkey.to_string(), now);

    match wallet.sign_message(message.as_bytes()) {
        Ok(_signature) => {
            state.form.clear();
            SubmitOutcome::Submitted
        }
        Err(WalletError::UserCancelled) => SubmitOutcome::Cancelled,
        Err(WalletError::Transport(reason)) => SubmitOutcome::Failed(reason),
    }
}

pub fn seed_proposals() -> Vec<Proposal> {
    vec![
        Proposal {
            id: 1,
            title: "Allocate 50% of Token Unlock for DEX Liquidity Boost".to_string(),
            description: "Upon token unlock, allocate 50% of unlocked tokens to provide deep \
                          liquidity across major DEX pools (Raydium, Orca) to reduce slippage \
                          and improve trading experience for WARD holders."
                .to_string(),
            category: "Token Unlock".to_string(),
            status: ProposalStatus::Active,
            votes_for: 3_847_392,
            votes_against: 1_283_920,
            total_votes: 5_131_312,
            ends_in: "3 days".to_string(),
            proposer: "0x7a3d...4f21".to_string(),
        },
        Proposal {
            id: 2,
            title: "Allocate 50% of Token Unlock for Token Burn".to_string(),
            description: "Upon token unlock, permanently burn 50% of unlocked tokens to reduce \
                          circulating supply, increase scarcity, and create long-term \
                          deflationary pressure for WARD token holders."
                .to_string(),
            category: "Token Burn".to_string(),
            status: ProposalStatus::Active,
            votes_for: 4_529_847,
            votes_against: 892_384,
            total_votes: 5_422_231,
            ends_in: "3 days".to_string(),
            proposer: "0x9f2c...8a91".to_string(),
        },
        Proposal {
            id: 3,
            title: "Implement Staking Rewards Program".to_string(),
            description: "Launch a staking program where WARD holders can lock tokens for \
                          30/60/90 days to earn additional WARD rewards. This incentivizes \
                          long-term holding and reduces circulating supply."
                .to_string(),
            category: "Protocol Upgrades".to_string(),
            status: ProposalStatus::Active,
            votes_for: 2_847_392,
            votes_against: 983_920,
            total_votes: 3_831_312,
            ends_in: "5 days".to_string(),
            proposer: "0x3b8f...2c45".to_string(),
        },
        Proposal {
            id: 4,
            title: "Partner with Top Security Auditors".to_string(),
            description: "Allocate 5% of treasury to partner with leading security firms \
                          (CertiK, Hacken) for continuous smart contract audits and security \
                          monitoring to enhance protocol safety."
                .to_string(),
            category: "Marketing Budget".to_string(),
            status: ProposalStatus::Active,
            votes_for: 3_247_192,
            votes_against: 748_293,
            total_votes: 3_995_485,
            ends_in: "6 days".to_string(),
            proposer: "0x5d2a...9f87".to_string(),
        },
    ]
}
