// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;
use tracing_subscriber::EnvFilter;

use bank_clients::{
    format_currency, load_detail, unavailable_note, Config, CustomerDetail, FileSheetSource,
    HttpSheetSource, ListView, LoadStatus, SheetSource,
};

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    command: Option<String>,
    customer_id: Option<String>,
    search: Option<String>,
    page: Option<usize>,
    json: bool,
    data_dir: Option<String>,
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut args = Args::default();
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--search" | "-s" => {
                args.search = Some(iter.next().context("--search needs a value")?.clone());
            }
            "--page" | "-p" => {
                let value = iter.next().context("--page needs a value")?;
                args.page = Some(value.parse().context("--page must be a number")?);
            }
            "--data-dir" => {
                args.data_dir = Some(iter.next().context("--data-dir needs a value")?.clone());
            }
            "--json" => args.json = true,
            other if other.starts_with('-') => bail!("Unknown option: {}", other),
            other if args.command.is_none() => args.command = Some(other.to_string()),
            other if args.customer_id.is_none() => args.customer_id = Some(other.to_string()),
            other => bail!("Unexpected argument: {}", other),
        }
    }

    Ok(args)
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let raw: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&raw)?;

    // The TUI owns the terminal, so it logs nothing unless RUST_LOG asks
    let default_filter = match args.command.as_deref() {
        None | Some("tui") => "off",
        _ => "bank_clients=info",
    };
    init_tracing(default_filter);

    let config = Config::from_env()?;

    let source: Box<dyn SheetSource> = match &args.data_dir {
        Some(dir) => Box::new(FileSheetSource::new(dir)),
        None => Box::new(HttpSheetSource::new(config.clone())?),
    };

    match args.command.as_deref() {
        None | Some("tui") => run_ui_mode(&config, source.as_ref()).await,
        Some("list") => run_list(&config, source.as_ref(), &args).await,
        Some("show") => {
            let id = args
                .customer_id
                .as_deref()
                .context("Usage: bank-clients show <customer-id>")?;
            run_show(source.as_ref(), id, args.json).await
        }
        Some(other) => bail!("Unknown command: {} (expected list, show or tui)", other),
    }
}

async fn run_list(config: &Config, source: &dyn SheetSource, args: &Args) -> Result<()> {
    let mut view = ListView::new(config.page_size);
    view.load(source).await;

    if let LoadStatus::Failed(message) = view.status() {
        bail!("Erro ao carregar clientes: {}", message);
    }

    if let Some(term) = &args.search {
        view.search(term);
    }
    if let Some(page) = args.page {
        view.go_to_page(page);
    }

    let page = view.current_page();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    println!("Lista de Clientes");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if page.items.is_empty() {
        println!("Nenhum cliente encontrado.");
    }
    for customer in &page.items {
        println!("{:>5}  {} - {}", customer.id, customer.name, customer.tax_id);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Página {} de {} ({} clientes)",
        page.page, page.total_pages, page.total_matches
    );

    Ok(())
}

async fn run_show(source: &dyn SheetSource, id: &str, json: bool) -> Result<()> {
    let detail = load_detail(source, id)
        .await
        .context("Erro ao carregar detalhes do cliente")?;

    let Some(detail) = detail else {
        bail!("Cliente não encontrado: {}", id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print_detail(&detail);
    }

    Ok(())
}

fn print_detail(detail: &CustomerDetail) {
    let c = &detail.customer;
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    println!("Detalhes do Cliente");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Nome:               {}", c.name);
    println!("Nome Social:        {}", or_dash(c.social_name.clone()));
    println!("CPF/CNPJ:           {}", c.tax_id);
    println!("RG:                 {}", or_dash(c.national_id.clone()));
    println!(
        "Data de Nascimento: {}",
        or_dash(c.birth_date.map(|d| d.format("%d/%m/%Y").to_string()))
    );
    println!("Email:              {}", c.email);
    println!("Endereço:           {}", c.address);
    println!("Estado Civil:       {}", c.marital_status);
    println!("Renda Anual:        {}", format_currency(c.annual_income));
    println!("Patrimônio:         {}", format_currency(c.net_worth));
    println!("Código Agência:     {}", or_dash(c.branch_code.map(|b| b.to_string())));

    println!("\nContas");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if detail.accounts.is_empty() {
        println!(
            "{}",
            unavailable_note("Nenhuma conta encontrada.", detail.accounts_error.as_deref())
        );
    }
    for account in &detail.accounts {
        println!("{} ({})", account.account_type, account.id);
        println!("  Saldo:              {}", format_currency(account.balance));
        println!("  Limite de Crédito:  {}", format_currency(account.credit_limit));
        println!("  Crédito Disponível: {}", format_currency(account.available_credit));
    }

    println!("\nAgência");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    match &detail.branch {
        Some(branch) => {
            println!("Nome:     {}", branch.name);
            println!("Código:   {}", or_dash(branch.code.map(|b| b.to_string())));
            println!("Endereço: {}", branch.address);
        }
        None => println!(
            "{}",
            unavailable_note("Agência não encontrada.", detail.branch_error.as_deref())
        ),
    }
}

#[cfg(feature = "tui")]
async fn run_ui_mode(config: &Config, source: &dyn SheetSource) -> Result<()> {
    println!("🖥️  Loading customers...\n");

    let mut list = ListView::new(config.page_size);
    list.load(source).await;

    let mut app = ui::App::new(list);
    ui::run_ui(&mut app, source).await?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn run_ui_mode(_config: &Config, _source: &dyn SheetSource) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: bank-clients list | bank-clients show <id>");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_list_args() {
        let args = parse_args(&strings(&["list", "--search", "ana", "--page", "2", "--json"])).unwrap();

        assert_eq!(args.command.as_deref(), Some("list"));
        assert_eq!(args.search.as_deref(), Some("ana"));
        assert_eq!(args.page, Some(2));
        assert!(args.json);
    }

    #[test]
    fn test_parse_show_args() {
        let args = parse_args(&strings(&["show", "42", "--data-dir", "./sheets"])).unwrap();

        assert_eq!(args.command.as_deref(), Some("show"));
        assert_eq!(args.customer_id.as_deref(), Some("42"));
        assert_eq!(args.data_dir.as_deref(), Some("./sheets"));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(&strings(&["list", "--page", "two"])).is_err());
        assert!(parse_args(&strings(&["list", "--bogus"])).is_err());
        assert!(parse_args(&strings(&["list", "--search"])).is_err());
        assert!(parse_args(&strings(&["show", "1", "2"])).is_err());
    }

    #[test]
    fn test_no_args_means_tui() {
        let args = parse_args(&[]).unwrap();
        assert!(args.command.is_none());
    }
}
