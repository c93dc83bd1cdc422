//! Keyword tables shared by every extraction pass (fund rows, investee rows, interaction notes).
//!
//! Tables are plain data: label -> trigger substrings. Triggers are matched against
//! [`normalize_text`] output, so a trigger with surrounding spaces (" erp ") only hits whole words.

use std::sync::OnceLock;

use crate::models::{DealType, Sector};

/// Bump when a table changes meaningfully; stored alongside persisted imports.
pub const VOCABULARY_VERSION: u32 = 1;

pub const SECTOR_TRIGGERS: &[(Sector, &[&str])] = &[
    (
        Sector::Technology,
        &["tech", "software", "saas", "digital", " ti ", "tecnologia", "tmt"],
    ),
    (
        Sector::Health,
        &[
            "saúde", "saude", "health", "hospital", "clínica", "clinica", "médic", "medic",
            "diagnóstic", "farmac", "oncolog",
        ],
    ),
    (
        Sector::Consumer,
        &["consumo", "consumer", "varejo", "retail", "cpg", "alimento", "beleza", "moda"],
    ),
    (
        Sector::FinancialServices,
        &["financ", "fintech", "banking", "banco", "seguro", "pagamento", "crédito"],
    ),
    (
        Sector::Agribusiness,
        &["agro", "agri", "rural", "fazenda", "agrícola", "agricola", "pecuár", "bioinsumo"],
    ),
    (
        Sector::Education,
        &["educa", "ensino", "escola", "universidade", "faculdade", " ead "],
    ),
    (
        Sector::Services,
        &["serviço", "servico", "service", "b2b", "bpo", "facilities", "terceirização"],
    ),
    (
        Sector::Infrastructure,
        &["infra", "saneamento", "energia", "utilities", "telecom"],
    ),
    (
        Sector::Industrial,
        &["industr", "manufatura", "fábrica", "fabrica", "embalagem", "químic"],
    ),
    (
        Sector::Logistics,
        &["logist", "logíst", "transporte", "frete"],
    ),
    (
        Sector::RealEstate,
        &["real estate", "imobili", "imóve", "imove", "propriedade"],
    ),
    (
        Sector::Telecom,
        &["telecom", "telecomunica", "fibra ótica", "fibra optica", "provedores de internet", " isp "],
    ),
];

pub const SEGMENT_TRIGGERS: &[(&str, &[&str])] = &[
    // tecnologia
    ("SaaS", &["saas", "software as a service"]),
    ("SaaS B2B", &["saas b2b", "b2b saas"]),
    ("Cybersecurity", &["cybersecurity", "cibersegurança", "segurança cibernética", "cyber"]),
    ("IoT", &[" iot ", "internet das coisas", "internet of things"]),
    ("Fintech", &["fintech", "tech financeira"]),
    ("Healthtech", &["healthtech", "health tech", "tech em saúde"]),
    ("Edtech", &["edtech", "ed tech", "tech em educação"]),
    ("Proptech", &["proptech", "prop tech"]),
    ("Agtech", &["agtech", "ag tech", "agrotech", "agrotecnologia"]),
    ("Logtech", &["logtech", "log tech"]),
    ("HRtech", &["hrtech", "hr tech"]),
    ("Legaltech", &["legaltech", "legal tech"]),
    ("Insurtech", &["insurtech", "insur tech"]),
    ("Govtech", &["govtech", "gov tech"]),
    ("Marketplace", &["marketplace"]),
    ("E-commerce", &["e-commerce", "ecommerce", "comércio eletrônico"]),
    ("Cloud", &["cloud", "nuvem"]),
    ("IA/ML", &["inteligência artificial", " ia ", " ai ", "machine learning", " ml "]),
    ("Data Analytics", &["analytics", "big data"]),
    ("ERP", &[" erp ", "gestão empresarial"]),
    ("CRM", &[" crm "]),
    ("Software", &["software", "sistemas"]),
    ("TMT", &[" tmt ", "tecnologia mídia"]),
    ("Fibra Ótica", &["fibra", "provedores internet", "provedores de internet"]),
    // saúde
    ("Hospitais", &["hospital", "hospitais", "hospitalar"]),
    ("Clínicas", &["clínica", "clinica"]),
    ("Laboratórios", &["laboratório", "laboratorio", "lab de", "labs de", "medicina diagnóstica"]),
    ("Diagnóstico", &["diagnóstico", "diagnostico", "diagnose"]),
    ("Farmacêutico", &["farmacêutic", "farmaceutic", "pharma", "medicamento"]),
    ("Equipamentos Médicos", &["equipamento médico", "equipamentos médicos", "dispositivos médicos"]),
    ("Dental/Odonto", &["dental", "odonto"]),
    ("Oftalmologia", &["oftalmolog"]),
    ("Oncologia", &["oncolog"]),
    ("Veterinário", &["veterinár", "veterinario", "pet health", "animal health", "saúde animal"]),
    ("Bem-estar/Wellness", &["bem-estar", "wellness", "bem estar", "saudabilidade"]),
    ("Nutrição Clínica", &["nutrição clínica", "nutricao clinica"]),
    // consumo
    ("Beleza/Cosméticos", &["beleza", "cosmético", "cosmetico", "beauty", " hpc ", "personal care"]),
    ("Moda", &[" moda", "vestuário", "vestuario", "fashion"]),
    ("Alimentos", &["alimento", " food", "comida", "bebida"]),
    ("Alimentos Saudáveis", &["alimento saudável", "alimentação saudável", "saudáveis"]),
    ("Pet", &[" pet ", " pets ", "animal de estimação", "ração animal"]),
    ("Varejo", &["varejo", "retail"]),
    ("Varejo Alimentar", &["varejo alimentar", "supermercado", "atacarejo"]),
    ("Supermercados", &["supermercado", "supermarket"]),
    ("Restaurantes", &["restaurante", "food service", "catering"]),
    ("Chocolates/Doces", &["chocolate", " doces", "confeitos"]),
    ("Suplementos/Vitaminas", &["suplemento", "vitamina", "minerais"]),
    // agro
    ("Agronegócio", &["agronegócio", " agro ", "agribusiness"]),
    ("Insumos Agrícolas", &["insumo", "input agrícola", "distribuição de insumos"]),
    ("Fertilizantes", &["fertilizante", "adubo", "nutrientes foliares"]),
    ("Bioinsumos", &["bioinsumo", "biológico", "biodefensivo", "defensivo biológico"]),
    ("Defensivos", &["defensivo", "agroquímico", "agroquimico"]),
    ("Sementes", &["semente", " seed "]),
    ("Nutrição Animal", &["nutrição animal", "nutricao animal", "ração"]),
    ("Pecuária", &["pecuária", "pecuaria", " gado", "leiteira"]),
    ("Pós-colheita", &["pós-colheita", "pos-colheita", "armazenagem"]),
    // educação
    ("Educação", &["educação", "educacao", "ensino"]),
    ("Ensino Básico/K-12", &["ensino básico", "ensino basico", "k-12", "k12", "ensino fundamental", "educação básica"]),
    ("Ensino Superior", &["ensino superior", "universidade", "faculdade", " ies "]),
    ("Cursos Livres", &["curso livre", "cursos livres", "profissionalizante", "ensino técnico"]),
    ("Idiomas", &["idioma", "inglês", " ingles", "language"]),
    ("EAD", &[" ead ", "ensino a distância", "educação a distância"]),
    // serviços
    ("BPO", &[" bpo ", "terceirização", "terceirizacao", "outsourcing"]),
    ("Facilities", &["facilities", "facility", "predial", "manutenção"]),
    ("Segurança", &["segurança patrimonial", "seguranca patrimonial", "vigilância", "security"]),
    ("Logística", &["logística", "logistica", "transporte", "frete"]),
    ("Consultoria", &["consultoria", "consulting"]),
    ("Locação/Rental", &["locação", "rental", "aluguel de equipamento"]),
    // financeiro
    ("Serviços Financeiros", &["serviço financeiro", "financial service", "serviços financeiros"]),
    ("Meios de Pagamento", &["pagamento", "payment", "adquirência", "adquirencia"]),
    ("Crédito", &["crédito", "credito", "lending", "empréstimo"]),
    ("Seguros", &["seguro", "insurance"]),
    ("Corretora", &["corretora", "broker"]),
    ("Gestão de Ativos", &["asset management", "gestão de ativos", "gestão de recursos"]),
    ("Consórcios", &["consórcio", "consorcio"]),
    ("Previdência", &["previdência", "previdencia"]),
    // infraestrutura
    ("Saneamento", &["saneamento", " água", "esgoto"]),
    ("Energia", &["energia", "energy", "elétric", "eletric"]),
    ("Energia Renovável", &["renovável", "renovavel", "solar", "eólica", "eolica", "fotovoltaica"]),
    ("Geração Distribuída", &["geração distribuída", "geracao distribuida"]),
    ("Telecom", &["telecom", "telecomunicaç"]),
    ("Data Center", &["data center", "datacenter"]),
    ("Infraestrutura", &["infraestrutura", " infra "]),
    // industrial
    ("Industrial", &["industrial", "manufatura", "fábrica"]),
    ("Embalagens", &["embalagem", "embalagens"]),
    ("Materiais de Construção", &["material de construção", "materiais de construção", "construção civil"]),
    ("Autopeças", &["autopeça", "autopeca"]),
    ("Químicos", &["químic", "quimic", "chemical"]),
    // outros
    ("Real Estate", &["real estate", "imobili", "imóve"]),
    ("Mineração", &["mineração", "mineracao", "mining"]),
    ("Smart Cities", &["smart city", "smart cities", "cidade inteligente"]),
    ("ESG", &[" esg ", "sustentabilidade", "economia circular"]),
    ("Bioeconomia", &["bioeconomia", "bio economia"]),
    ("Carbono", &["carbono"]),
];

pub const DEAL_TYPE_TRIGGERS: &[(DealType, &[&str])] = &[
    (DealType::Control, &["controle", "control", "100%"]),
    (DealType::Minority, &["minoritár", "minoritario", "minority"]),
    (DealType::Majority, &["majoritár", "majoritario", "majority"]),
    (DealType::Growth, &["growth", "late stage"]),
    (DealType::VentureCapital, &[" vc ", "venture", " seed ", "series a", "série a"]),
];

/// A label -> normalized-triggers table, built once from one of the static tables above.
#[derive(Debug)]
pub struct KeywordTable<K> {
    entries: Vec<(K, Vec<String>)>,
}

impl<K: Copy + 'static> KeywordTable<K> {
    pub fn from_static(table: &'static [(K, &'static [&'static str])]) -> Self {
        let entries = table
            .iter()
            .map(|(label, triggers)| (*label, triggers.iter().map(|t| normalize_trigger(t)).collect()))
            .collect();
        Self { entries }
    }

    /// Every label with at least one trigger inside `normalized`, in table order.
    pub fn matches<'a>(&'a self, normalized: &'a str) -> impl Iterator<Item = K> + 'a {
        self.entries
            .iter()
            .filter(move |(_, triggers)| triggers.iter().any(|t| normalized.contains(t.as_str())))
            .map(|(label, _)| *label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn sector_table() -> &'static KeywordTable<Sector> {
    static TABLE: OnceLock<KeywordTable<Sector>> = OnceLock::new();
    TABLE.get_or_init(|| KeywordTable::from_static(SECTOR_TRIGGERS))
}

pub fn segment_table() -> &'static KeywordTable<&'static str> {
    static TABLE: OnceLock<KeywordTable<&'static str>> = OnceLock::new();
    TABLE.get_or_init(|| KeywordTable::from_static(SEGMENT_TRIGGERS))
}

pub fn deal_type_table() -> &'static KeywordTable<DealType> {
    static TABLE: OnceLock<KeywordTable<DealType>> = OnceLock::new();
    TABLE.get_or_init(|| KeywordTable::from_static(DEAL_TYPE_TRIGGERS))
}

fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | ';' | ':' | '.' | '(' | ')' | '[' | ']' | '{' | '}' | '!' | '?' | '"' | '\''
                | '“' | '”' | '‘' | '’' | '/' | '\\' | '|' | '•' | '*'
        )
}

/// Lowercase, turn punctuation into spaces and collapse runs of spaces. Edge spaces survive.
fn collapse(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        if is_separator(c) {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn normalize_trigger(trigger: &str) -> String {
    collapse(trigger)
}

/// Matching form of free text: lowercased, punctuation-free, padded with one space each side.
pub fn normalize_text(text: &str) -> String {
    format!(" {} ", collapse(text).trim())
}
