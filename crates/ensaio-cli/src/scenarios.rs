//! The scenarios shipped with the CLI.
//!
//! These are data, not engineering: ordered step lists with the locators the
//! target application's pages render. The login credentials and base URL come
//! from [`Target`], filled in by the CLI from flags or environment.

use ensaio::{Locator, Scenario, ScenarioBuilder, Step};

/// Where and as whom the scenarios run
#[derive(Debug, Clone)]
pub struct Target {
    /// Frontend base URL
    pub base_url: String,
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
}

/// Names of all registered scenarios
pub const SCENARIO_NAMES: &[&str] = &["register-client", "report-generation"];

/// Look up a scenario by name
#[must_use]
pub fn by_name(name: &str, target: &Target) -> Option<Scenario> {
    match name {
        "register-client" => Some(register_client(target)),
        "report-generation" => Some(report_generation(target)),
        _ => None,
    }
}

fn login(builder: ScenarioBuilder, target: &Target) -> ScenarioBuilder {
    builder
        .step(Step::fill(Locator::id("username"), &target.username).note("Logging in..."))
        .fill(Locator::id("password"), &target.password)
        .click(Locator::xpath("//form//button[@type='submit']"))
}

/// Register a new client through the administration pages.
#[must_use]
pub fn register_client(target: &Target) -> Scenario {
    let builder = Scenario::builder("register-client", &target.base_url);
    login(builder, target)
        .step(
            Step::click(Locator::xpath("//nav//button[contains(., 'Administração')]"))
                .note("Accessing the clients page..."),
        )
        .click(Locator::xpath("//nav//a[contains(., 'Clientes')]"))
        .step(
            Step::click(Locator::button_text("+ Cadastrar Cliente"))
                .note("Opening the client registration form..."),
        )
        .step(
            Step::fill(Locator::label_input("Código Do Cliente"), "12345")
                .note("Filling main data..."),
        )
        .fill(Locator::label_input("Razão Social"), "Empresa Teste LTDA")
        .fill(Locator::label_input("Nome Fantasia"), "Nome Fantasia Teste")
        .step(
            Step::fill(Locator::label_input("CNPJ/CPF"), "00.123.456/0001-78")
                .note("Filling fiscal data..."),
        )
        .fill(Locator::label_input("Inscrição Estadual"), "123456789")
        .fill(Locator::placeholder("Ex.: Rede Cerramix"), "Rede Teste")
        .step(
            Step::fill(Locator::label_input("Email"), "teste@empresa.com")
                .note("Filling contact data..."),
        )
        // Masked field: the text must arrive as discrete keystrokes
        .fill(Locator::placeholder("(99) 99999-9999"), "61999998888")
        .step(Step::fill(Locator::label_input("Estado"), "DF").note("Filling address..."))
        .fill(Locator::label_input("Bairro"), "Asa Sul")
        .fill(
            Locator::label_input("Endereço"),
            "QS 14 CONJUNTO 07 LOTE 03/04",
        )
        // CEP is masked as well
        .fill(Locator::placeholder("12345-678"), "71000123")
        .fill(Locator::placeholder("Ex.: Boleto Santander"), "Boleto Santander")
        .step(Step::click(Locator::button_text("Salvar")).note("Saving the client..."))
        .expect_text(
            Locator::containing_text("Cliente cadastrado com sucesso"),
            "Cliente cadastrado com sucesso",
        )
}

/// Generate a daily report through the multi-step form.
#[must_use]
pub fn report_generation(target: &Target) -> Scenario {
    let builder = Scenario::builder("report-generation", &target.base_url);
    login(builder, target)
        .step(
            Step::click(Locator::xpath("//nav//button[contains(., 'Relatórios')]"))
                .note("Accessing the reports page..."),
        )
        .click(Locator::xpath("//nav//a[contains(., 'Relatórios')]"))
        .step(
            Step::click(Locator::button_text("Gerar Relatório"))
                .note("Opening the report dialog..."),
        )
        .step(
            Step::select(
                Locator::xpath("(//div[@role='dialog']//button[@data-slot='popover-trigger'])[1]"),
                Locator::xpath("//div[@data-radix-popper-content-wrapper]//div[@role='option'][1]"),
            )
            .note("Selecting the buyer..."),
        )
        .step(Step::click(Locator::button_text("Próximo")).note("Next stage (1/3)..."))
        .step(
            Step::fill(
                Locator::xpath("//label[contains(., 'Motorista')]/following-sibling::input"),
                "Alex",
            )
            .note("Filling transport information..."),
        )
        .select(
            Locator::id("vehicleId"),
            Locator::xpath("//div[@data-radix-popper-content-wrapper]//div[@role='option'][1]"),
        )
        .click(Locator::xpath("//label[contains(., 'Conforme')]"))
        .fill(
            Locator::xpath(
                "//label[contains(., 'Temperatura do veículo')]/following-sibling::input",
            ),
            "4",
        )
        .step(Step::click(Locator::button_text("Próximo")).note("Next stage (2/3)..."))
        .step(
            Step::fill(
                Locator::xpath("//label[contains(., 'Nota Fiscal')]/following-sibling::input"),
                "789654",
            )
            .note("Filling product information..."),
        )
        .select(
            Locator::button_text("Selecione um produto"),
            Locator::xpath(
                "//div[@data-radix-popper-content-wrapper]//*[text()='Linguiça Suína - 650g']",
            ),
        )
        .fill(Locator::label_input("Quantidade (Unidade)"), "25")
        .click(Locator::xpath("//label[normalize-space()='Sim']"))
        .fill(Locator::placeholder("Ex.: 4,5"), "3")
        .select(
            Locator::button_text("Selecione uma data"),
            Locator::xpath(
                "(//div[@data-radix-popper-content-wrapper]//button[normalize-space()='15'])[1]",
            ),
        )
        .step(Step::click(Locator::button_text("Próximo")).note("Next stage (3/3)..."))
        .step(Step::click(Locator::button_text("Confirmar")).note("Confirming the report..."))
        .expect_text(
            Locator::xpath("//div[@role='alert']"),
            "Relatório gerado com sucesso!",
        )
}
