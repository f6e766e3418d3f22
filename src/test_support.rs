//! In-memory sheet source and CSV fixtures for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::LoadError;
use crate::fetcher::{Sheet, SheetSource};

pub const CUSTOMERS_HEADER: &str = "id,cpfCnpj,rg,dataNascimento,nome,nomeSocial,email,endereco,rendaAnual,patrimonio,estadoCivil,codigoAgencia";

pub const CUSTOMERS_CSV: &str = "\
id,cpfCnpj,rg,dataNascimento,nome,nomeSocial,email,endereco,rendaAnual,patrimonio,estadoCivil,codigoAgencia
1,\"111.111.111-11\",MG-1,1980-01-15,\"Ana Souza\",,ana@example.com,\"Rua A, 1\",85000,120000,Casado,10
2,\"222.222.222-22\",,1992-07-02,\"Bruno Lima\",\"Bia\",bruno@example.com,Rua B,42000.5,5000,Solteiro,12
3,\"33.333.333/0001-33\",,,\"Carla Mendes LTDA\",,carla@example.com,Av C,abc,0,Divorciado,99
";

pub const ACCOUNTS_CSV: &str = "\
id,cpfCnpjCliente,tipo,saldo,limiteCredito,creditoDisponivel
100,111.111.111-11,corrente,1500.25,2000,1800
101,222.222.222-22,poupanca,300,0,0
102,111.111.111-11,poupanca,9000,0,0
103,333.333.333-33,corrente,10,100,90
";

pub const BRANCHES_CSV: &str = "\
id,codigo,nome,endereco
b1,10,Agência Centro,\"Praça Sete, 100\"
b2,12,Agência Savassi,Rua Pernambuco 5
";

/// `count` customers named "Cliente N" with tax ids "000.000.000-NN"
pub fn numbered_customers_csv(count: usize) -> String {
    let mut csv = String::from(CUSTOMERS_HEADER);
    csv.push('\n');
    for i in 1..=count {
        csv.push_str(&format!(
            "{i},000.000.000-{i:02},,1990-01-01,Cliente {i},,c{i}@example.com,Rua {i},1000,1000,Solteiro,10\n"
        ));
    }
    csv
}

/// Serves canned responses and records every sheet requested
pub struct MemorySheetSource {
    sheets: HashMap<Sheet, Result<String, LoadError>>,
    calls: Mutex<Vec<Sheet>>,
}

impl MemorySheetSource {
    pub fn new() -> Self {
        Self {
            sheets: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The three standard fixtures
    pub fn standard() -> Self {
        Self::new()
            .with_sheet(Sheet::Customers, CUSTOMERS_CSV)
            .with_sheet(Sheet::Accounts, ACCOUNTS_CSV)
            .with_sheet(Sheet::Branches, BRANCHES_CSV)
    }

    pub fn with_sheet(mut self, sheet: Sheet, csv: &str) -> Self {
        self.sheets.insert(sheet, Ok(csv.to_string()));
        self
    }

    pub fn with_error(mut self, sheet: Sheet, error: LoadError) -> Self {
        self.sheets.insert(sheet, Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Sheet> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SheetSource for MemorySheetSource {
    async fn fetch_sheet(&self, sheet: Sheet) -> Result<String, LoadError> {
        self.calls.lock().unwrap().push(sheet);
        self.sheets.get(&sheet).cloned().unwrap_or_else(|| {
            Err(LoadError::Http {
                url: format!("memory://{}", sheet.name()),
                status: 404,
            })
        })
    }
}
