//! Headless walkthroughs of the site controllers.
//!
//! Each command mounts the controllers on an in-memory page with a manual
//! clock, drives a short scenario and logs what the page would show.
//!
//!   giving menu-demo
//!   giving scroll-demo
//!   giving stats-demo
//!   giving donate-demo
//!   giving --config site.json donate-demo
//!   giving print-config

use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use giving::prelude::*;
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut config_path: Option<PathBuf> = None;
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        if pos + 1 >= args.len() {
            eprintln!("--config needs a path");
            process::exit(2);
        }
        config_path = Some(PathBuf::from(args.remove(pos + 1)));
        args.remove(pos);
    }

    let cfg = match config_path {
        Some(path) => match SiteConfig::load(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        },
        None => SiteConfig::default(),
    };

    match args.first().map(String::as_str) {
        None | Some("--help") | Some("-h") | Some("help") => print_help(),
        Some("menu-demo") => run_menu_demo(&cfg),
        Some("scroll-demo") => run_scroll_demo(&cfg),
        Some("stats-demo") => run_stats_demo(&cfg),
        Some("donate-demo") => run_donate_demo(&cfg),
        Some("print-config") => match cfg.to_json_pretty() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        },
        Some(other) => {
            eprintln!("Unknown command: {other}");
            print_help();
            process::exit(2);
        }
    }
}

fn print_help() {
    println!(
        "giving - headless walkthroughs of the site controllers\n\n\
         USAGE:\n  giving [--config <path>] <command>\n\n\
         COMMANDS:\n\
         \x20 menu-demo     toggle and force-close the mobile menu\n\
         \x20 scroll-demo   follow in-page links with the menu open\n\
         \x20 stats-demo    reveal the stats section and run the counters\n\
         \x20 donate-demo   open the modal, pick an amount and pay\n\
         \x20 print-config  print the effective config as JSON"
    );
}

/// The stock page: every element role under its configured selector.
fn demo_page(cfg: &SiteConfig) -> HeadlessPage {
    let sel = &cfg.selectors;
    let mut page = HeadlessPage::new();

    let toggle = page.element("menu-toggle").with_text(&cfg.navigation.open_glyph);
    page.insert(&sel.menu_toggle, toggle);
    let panel = page.element("nav-menu");
    page.insert(&sel.nav_panel, panel);

    for (id, href) in [("top", "#"), ("mission", "#mission"), ("team", "#team"), ("gone", "#gone")] {
        let link = page.element(&format!("link-{id}")).with_attribute("href", href);
        page.insert(&sel.fragment_links, link);
    }
    for id in ["mission", "team"] {
        let section = page.element(id);
        page.insert(&format!("#{id}"), section);
    }

    let stats = page.element("stats");
    page.insert(&sel.stats_section, stats);
    for (i, text) in ["1,250+", "48", "98%", "2,500,000+"].iter().enumerate() {
        let el = page.element(&format!("stat-{i}")).with_text(text);
        page.insert(&sel.counters, el);
    }

    let modal = page.element("donation-modal");
    page.insert(&sel.donation_modal, modal);
    let trigger = page.element("donate-hero");
    page.insert(&sel.donate_triggers, trigger);
    for amount in ["25", "50", "100"] {
        let el = page.element(&format!("amount-{amount}"));
        page.insert(&sel.amount_buttons, el);
    }
    let close = page.element("modal-close");
    page.insert(&sel.modal_close, close);
    let process = page.element("process-payment").with_text("Complete Donation");
    page.insert(&sel.process_payment, process);
    let form = page.element("step-1");
    page.insert(&sel.step_form, form);
    let success = page.element("step-2");
    page.insert(&sel.step_success, success);
    let success_close = page.element("success-close");
    page.insert(&sel.success_close, success_close);

    page
}

fn mount(cfg: &SiteConfig) -> (HeadlessPage, ManualScheduler, Site<HeadlessElement>) {
    let page = demo_page(cfg);
    let sched = ManualScheduler::new();
    let site = Site::mount(&page, cfg, Rc::new(sched.clone()), Rc::new(sched.clone()));
    info!("Foundation site initialized ({})", site.summary());
    (page, sched, site)
}

fn run_menu_demo(cfg: &SiteConfig) {
    let (page, _sched, site) = mount(cfg);
    let Some(nav) = site.navigation else {
        error!("no navigation on the demo page");
        return;
    };
    let toggle = nav.toggle_element().clone();

    for _ in 0..3 {
        let state = nav.toggle();
        info!(
            "toggle -> open={} aria-expanded={:?} glyph={}",
            state.is_open(),
            toggle.attribute("aria-expanded").unwrap_or_default(),
            toggle.text()
        );
    }
    info!("close_menu changed={}", nav.close_menu());
    info!("close_menu again changed={}", nav.close_menu());
    info!("{} effects recorded", page.journal().len());
}

fn run_scroll_demo(cfg: &SiteConfig) {
    let (page, _sched, site) = mount(cfg);
    for i in 0..site.smooth_scroll.links().len() {
        if let Some(nav) = &site.navigation {
            if !nav.state().is_open() {
                nav.toggle();
            }
        }
        let href = site.smooth_scroll.links()[i]
            .attribute("href")
            .unwrap_or_default();
        let outcome = site.smooth_scroll.handle_link_click(i, |id| page.by_id(id));
        let menu_open = site.navigation.as_ref().map(|n| n.state().is_open());
        info!("click {href:?} -> {outcome:?}, menu open: {menu_open:?}");
    }
}

fn run_stats_demo(cfg: &SiteConfig) {
    let (page, sched, site) = mount(cfg);
    let Some(stats) = site.stats else {
        error!("no stats section on the demo page");
        return;
    };
    let counters = page.query_all(&cfg.selectors.counters);

    info!("section at 30% visibility: {:?}", stats.on_visibility(false));
    info!("section at 60% visibility: {:?}", stats.on_visibility(true));

    let step = Duration::from_millis(250);
    while stats.state() == AnimationState::Running {
        sched.advance(step);
        let texts: Vec<String> = counters.iter().map(|c| c.text()).collect();
        info!("t={:>5}ms {}", sched.now().as_millis(), texts.join("  "));
    }
    info!("section re-entered: {:?}", stats.on_visibility(true));
}

fn run_donate_demo(cfg: &SiteConfig) {
    let (_page, sched, site) = mount(cfg);
    let Some(modal) = site.donation else {
        error!("no donation modal on the demo page");
        return;
    };

    modal.open();
    info!("opened: {:?}", modal.state());
    modal.select_amount(0);
    modal.select_amount(2);
    info!("selected amount #{:?}", modal.state().selected);
    info!(
        "content click closed: {}",
        modal.handle_overlay_click(ClickTarget::Content)
    );

    modal.process_payment();
    if let Some(btn) = &modal.elements().process {
        info!("processing: button {:?} disabled={}", btn.text(), btn.is_disabled());
    }
    sched.advance(cfg.donation.payment_delay());
    info!("after {}ms: {:?}", cfg.donation.payment_delay_ms, modal.state().step());

    info!(
        "backdrop click closed: {}",
        modal.handle_overlay_click(ClickTarget::Backdrop)
    );
    modal.open();
    info!("reopened: {:?}", modal.state());
}
