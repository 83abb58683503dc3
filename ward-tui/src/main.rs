use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;

mod api_client;
mod app;
mod config;
mod dao;
mod portfolio;
mod scanner;
mod tasks;
mod ui;
mod wallet;

use api_client::{AuditApiClient, HoldingsClient};
use app::{App, AppEvent, InputFocus, Tab};
use dao::{cast_vote, submit_proposal, SubmitOutcome, VoteOutcome, DEMO_VOTING_POWER};
use portfolio::{
    Phase, SignalSample, COUNTDOWN_INTERVAL_SECS, JITTER_INTERVAL_SECS, REFRESH_INTERVAL_SECS,
    SIGNAL_FETCH_GAP_MS, SIGNAL_INTERVAL_SECS,
};
use scanner::PROGRESS_TICK_MS;
use tasks::repeating;
use wallet::{DisconnectedWallet, KeypairWallet, Wallet};
use ward_core::dexscreener::DexClient;
use ward_core::models::VoteChoice;
use ward_core::signal::SignalInputs;

struct Clients {
    audit: AuditApiClient,
    holdings: HoldingsClient,
    dex: DexClient,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config();

    let clients = Arc::new(Clients {
        audit: AuditApiClient::new(config.api_url.clone()),
        holdings: HoldingsClient::new(config.holdings_url.clone()),
        dex: DexClient::new(config.dexscreener_url.clone()),
    });

    let wallet: Box<dyn Wallet> = match &config.keypair_path {
        Some(path) => match KeypairWallet::from_file(path) {
            Ok(wallet) => Box::new(wallet),
            Err(err) => {
                eprintln!("{err:#}");
                Box::new(DisconnectedWallet)
            }
        },
        None => Box::new(DisconnectedWallet),
    };

    // Demo-mode voting power; a real balance check needs a governance
    // mint to query against.
    let voting_power = if wallet.connected() {
        DEMO_VOTING_POWER
    } else {
        0
    };
    let wallet_label = wallet.pubkey().map(|pk| pk.to_string());

    let (tx, mut rx) = mpsc::channel(100);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(wallet_label.clone(), voting_power);
    match wallet_label {
        Some(label) => app.add_log(format!("Wallet loaded: {label}")),
        None => app.add_log("No wallet loaded. Use --keypair-path to connect.".to_string()),
    }

    let res = run_app(&mut terminal, &mut app, tx, &mut rx, clients, wallet.as_ref()).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tx: mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
    clients: Arc<Clients>,
    wallet: &dyn Wallet,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        while let Ok(event) = rx.try_recv() {
            apply_event(app, event, &tx, &clients);
        }

        if crossterm::event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    app.quit();
                    return Ok(());
                }
                match key.code {
                    KeyCode::Esc => {
                        if app.in_proposal_form() {
                            app.focus = None;
                        } else if app.tab == Tab::Portfolio
                            && app.portfolio.phase != Phase::Idle
                        {
                            app.portfolio.stop_monitoring();
                            app.add_log("Monitoring stopped".to_string());
                        } else {
                            app.quit();
                            return Ok(());
                        }
                    }
                    KeyCode::Tab => {
                        if app.in_proposal_form() {
                            app.next_form_field();
                        } else {
                            app.next_tab();
                        }
                    }
                    KeyCode::Backspace => app.pop_input(),
                    KeyCode::Enter => match app.tab {
                        Tab::Scanner => start_scan(app, &tx, &clients),
                        Tab::Portfolio => start_monitor(app, &tx, &clients),
                        Tab::Dao => {
                            if app.in_proposal_form() {
                                handle_submit(app, wallet);
                            }
                        }
                    },
                    KeyCode::Up if app.tab == Tab::Dao => app.dao.select_prev(),
                    KeyCode::Down if app.tab == Tab::Dao => app.dao.select_next(),
                    KeyCode::Char(c) => {
                        if app.focus.is_some() {
                            app.push_input(c);
                        } else if app.tab == Tab::Dao {
                            match c {
                                'f' => handle_vote(app, wallet, VoteChoice::For),
                                'a' => handle_vote(app, wallet, VoteChoice::Against),
                                'n' => app.focus = Some(InputFocus::ProposalTitle),
                                'q' => {
                                    app.quit();
                                    return Ok(());
                                }
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn apply_event(app: &mut App, event: AppEvent, tx: &mpsc::Sender<AppEvent>, clients: &Arc<Clients>) {
    match event {
        AppEvent::Log(message) => app.add_log(message),
        AppEvent::ScanProgress => app.scanner.on_progress_tick(),
        AppEvent::ScanFinished(result) => {
            app.add_log(format!(
                "Scan complete: {} scored {}/100",
                result.token_info.symbol, result.overall_score
            ));
            app.scanner.on_result(*result);
        }
        AppEvent::ScanFailed(message) => {
            app.add_log(format!("Scan failed: {message}"));
            app.scanner.on_error(message);
        }
        AppEvent::HoldingsFetched {
            holdings,
            total_value,
        } => {
            app.add_log(format!("Loaded {} holdings", holdings.len()));
            app.portfolio.apply_holdings(holdings, total_value, Utc::now());
            if app.portfolio.phase == Phase::Monitoring && app.portfolio.refresh_guard.is_none() {
                install_portfolio_timers(app, tx);
                // Kick off the first signal sweep right away.
                let _ = tx.try_send(AppEvent::SignalSweepDue);
            }
        }
        AppEvent::HoldingsFailed(message) => {
            app.add_log(format!("Portfolio fetch failed: {message}"));
            app.portfolio.apply_fetch_error(message);
        }
        AppEvent::RefreshDue => {
            if app.portfolio.phase == Phase::Monitoring {
                app.portfolio.begin_refresh();
                spawn_holdings_fetch(
                    tx.clone(),
                    clients.clone(),
                    app.portfolio.wallet_input.trim().to_string(),
                );
            }
        }
        AppEvent::JitterTick => app.portfolio.apply_jitter(&mut rand::thread_rng()),
        AppEvent::CountdownTick => {
            if matches!(app.portfolio.phase, Phase::Monitoring | Phase::Refreshing) {
                app.portfolio.countdown_tick();
            }
        }
        AppEvent::SignalSweepDue => {
            let targets = app.portfolio.signal_targets(Utc::now().timestamp_millis());
            if !targets.is_empty() {
                spawn_signal_sweep(tx.clone(), clients.clone(), targets);
            }
        }
        AppEvent::SignalSampled(sample) => {
            app.portfolio
                .record_sample(sample, Utc::now().timestamp_millis());
        }
    }
}

fn start_scan(app: &mut App, tx: &mpsc::Sender<AppEvent>, clients: &Arc<Clients>) {
    let address = app.scanner.address_input.trim().to_string();
    if address.is_empty() || app.scanner.scanning {
        return;
    }

    app.scanner.begin_scan();
    app.scanner.progress_guard = Some(repeating(
        tx.clone(),
        Duration::from_millis(PROGRESS_TICK_MS),
        || AppEvent::ScanProgress,
    ));

    let tx = tx.clone();
    let clients = clients.clone();
    tokio::spawn(async move {
        match clients.audit.audit(&address).await {
            Ok(result) => {
                let _ = tx.send(AppEvent::ScanFinished(Box::new(result))).await;
            }
            Err(err) => {
                let _ = tx.send(AppEvent::ScanFailed(err.to_string())).await;
            }
        }
    });
}

fn start_monitor(app: &mut App, tx: &mpsc::Sender<AppEvent>, clients: &Arc<Clients>) {
    let wallet = app.portfolio.wallet_input.trim().to_string();
    if wallet.is_empty() || app.portfolio.phase == Phase::Loading {
        return;
    }

    app.portfolio.begin_monitor();
    spawn_holdings_fetch(tx.clone(), clients.clone(), wallet);
}

fn install_portfolio_timers(app: &mut App, tx: &mpsc::Sender<AppEvent>) {
    app.portfolio.refresh_guard = Some(repeating(
        tx.clone(),
        Duration::from_secs(REFRESH_INTERVAL_SECS),
        || AppEvent::RefreshDue,
    ));
    app.portfolio.jitter_guard = Some(repeating(
        tx.clone(),
        Duration::from_secs(JITTER_INTERVAL_SECS),
        || AppEvent::JitterTick,
    ));
    app.portfolio.countdown_guard = Some(repeating(
        tx.clone(),
        Duration::from_secs(COUNTDOWN_INTERVAL_SECS),
        || AppEvent::CountdownTick,
    ));
    app.portfolio.signal_guard = Some(repeating(
        tx.clone(),
        Duration::from_secs(SIGNAL_INTERVAL_SECS),
        || AppEvent::SignalSweepDue,
    ));
}

fn spawn_holdings_fetch(tx: mpsc::Sender<AppEvent>, clients: Arc<Clients>, wallet: String) {
    tokio::spawn(async move {
        match clients.holdings.holdings(&wallet).await {
            Ok(body) => {
                let _ = tx
                    .send(AppEvent::HoldingsFetched {
                        holdings: body.holdings,
                        total_value: body.total_value,
                    })
                    .await;
            }
            Err(err) => {
                let _ = tx.send(AppEvent::HoldingsFailed(err.to_string())).await;
            }
        }
    });
}

/// Fetch one market sample per target with a short gap between lookups;
/// failed lookups still produce a sample so the view can fall back to
/// cache or a neutral hold.
fn spawn_signal_sweep(
    tx: mpsc::Sender<AppEvent>,
    clients: Arc<Clients>,
    targets: Vec<(String, f64, u8)>,
) {
    tokio::spawn(async move {
        let last = targets.len().saturating_sub(1);
        for (i, (address, last_price, risk_score)) in targets.into_iter().enumerate() {
            let inputs = match clients.dex.first_pair(&address).await {
                Ok(Some(pair)) => Some(SignalInputs::from_pair(&pair, risk_score)),
                Ok(None) | Err(_) => None,
            };
            let sample = SignalSample {
                address,
                last_price,
                inputs,
            };
            if tx.send(AppEvent::SignalSampled(sample)).await.is_err() {
                return;
            }
            if i < last {
                tokio::time::sleep(Duration::from_millis(SIGNAL_FETCH_GAP_MS)).await;
            }
        }
    });
}

fn handle_vote(app: &mut App, wallet: &dyn Wallet, choice: VoteChoice) {
    let Some(proposal) = app.dao.proposals.get(app.dao.selected) else {
        return;
    };
    let proposal_id = proposal.id;
    let voting_power = app.dao.voting_power;

    match cast_vote(&mut app.dao, wallet, proposal_id, choice, Utc::now()) {
        VoteOutcome::Recorded => {
            app.dao.status = Some(format!(
                "Vote {} recorded with {} voting power",
                choice.as_str(),
                voting_power
            ));
        }
        VoteOutcome::Cancelled => {
            app.dao.status = Some("Vote cancelled: signature request rejected".to_string());
        }
        VoteOutcome::Failed(reason) => {
            app.dao.status = Some(format!("Vote failed: {reason}"));
        }
        VoteOutcome::NotEligible(reason) => app.dao.status = Some(reason),
    }
}

fn handle_submit(app: &mut App, wallet: &dyn Wallet) {
    match submit_proposal(&mut app.dao, wallet, Utc::now()) {
        SubmitOutcome::Submitted => {
            app.dao.status =
                Some("Proposal submitted for community review".to_string());
            app.focus = None;
        }
        SubmitOutcome::Cancelled => {
            app.dao.status = Some("Submission cancelled: signature request rejected".to_string());
        }
        SubmitOutcome::Failed(reason) => {
            app.dao.status = Some(format!("Submission failed: {reason}"));
        }
        SubmitOutcome::NotEligible(reason) => app.dao.status = Some(reason),
    }
}
