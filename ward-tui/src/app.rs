use ward_core::models::{AuditResult, TokenHolding};

use crate::dao::DaoState;
use crate::portfolio::{PortfolioState, SignalSample};
use crate::scanner::ScannerState;

/// Events produced by async tasks and timers, applied to the app on the
/// UI loop. All view-state mutation happens on this single thread.
pub enum AppEvent {
    Log(String),
    ScanProgress,
    ScanFinished(Box<AuditResult>),
    ScanFailed(String),
    HoldingsFetched {
        holdings: Vec<TokenHolding>,
        total_value: f64,
    },
    HoldingsFailed(String),
    RefreshDue,
    JitterTick,
    CountdownTick,
    SignalSweepDue,
    SignalSampled(SignalSample),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Scanner,
    Portfolio,
    Dao,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Scanner => Tab::Portfolio,
            Tab::Portfolio => Tab::Dao,
            Tab::Dao => Tab::Scanner,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Scanner => "Scanner",
            Tab::Portfolio => "Portfolio",
            Tab::Dao => "DAO",
        }
    }
}

/// Which text field keystrokes are routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    ScannerAddress,
    PortfolioWallet,
    ProposalTitle,
    ProposalCategory,
    ProposalDescription,
}

pub struct App {
    pub should_quit: bool,
    pub tab: Tab,
    pub logs: Vec<String>,
    pub scanner: ScannerState,
    pub portfolio: PortfolioState,
    pub dao: DaoState,
    pub wallet_label: Option<String>,
    pub focus: Option<InputFocus>,
}

impl App {
    pub fn new(wallet_label: Option<String>, voting_power: u64) -> Self {
        Self {
            should_quit: false,
            tab: Tab::Scanner,
            logs: vec!["Welcome to Ward AI".to_string()],
            scanner: ScannerState::default(),
            portfolio: PortfolioState::default(),
            dao: DaoState::new(voting_power),
            wallet_label,
            focus: Some(InputFocus::ScannerAddress),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > 200 {
            self.logs.remove(0);
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.focus = match self.tab {
            Tab::Scanner => Some(InputFocus::ScannerAddress),
            Tab::Portfolio => Some(InputFocus::PortfolioWallet),
            Tab::Dao => None,
        };
    }

    pub fn in_proposal_form(&self) -> bool {
        matches!(
            self.focus,
            Some(InputFocus::ProposalTitle)
                | Some(InputFocus::ProposalCategory)
                | Some(InputFocus::ProposalDescription)
        )
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus? {
            InputFocus::ScannerAddress => Some(&mut self.scanner.address_input),
            InputFocus::PortfolioWallet => Some(&mut self.portfolio.wallet_input),
            InputFocus::ProposalTitle => Some(&mut self.dao.form.title),
            InputFocus::ProposalCategory => Some(&mut self.dao.form.category),
            InputFocus::ProposalDescription => Some(&mut self.dao.form.description),
        }
    }

    pub fn push_input(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            field.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.pop();
        }
    }

    pub fn next_form_field(&mut self) {
        self.focus = match self.focus {
            Some(InputFocus::ProposalTitle) => Some(InputFocus::ProposalCategory),
            Some(InputFocus::ProposalCategory) => Some(InputFocus::ProposalDescription),
            Some(InputFocus::ProposalDescription) => Some(InputFocus::ProposalTitle),
            other => other,
        };
    }
}
