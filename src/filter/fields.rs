//! Columns of `agenda_base` the filter layer knows about.

pub const TABLE: &str = "agenda_base";

pub const ID: &str = "id_legalone";
pub const KIND: &str = "compromisso_tarefa";
pub const TYPE: &str = "tipo";
pub const SUBTYPE: &str = "subtipo";
pub const LABEL: &str = "etiqueta";
pub const START_DATE: &str = "inicio_data";
pub const EXPECTED_END_DATE: &str = "conclusao_prevista_data";
pub const ACTUAL_END_DATE: &str = "conclusao_efetiva_data";
pub const DEADLINE: &str = "prazo_fatal_data";
pub const FOLDER: &str = "pasta_proc";
pub const CNJ_NUMBER: &str = "numero_cnj";
pub const EXECUTOR: &str = "executante";
pub const DESCRIPTION: &str = "descricao";
pub const STATUS: &str = "status";
pub const LINK: &str = "link";

pub const ALL: [&str; 15] = [
    ID, KIND, TYPE, SUBTYPE, LABEL, START_DATE, EXPECTED_END_DATE, ACTUAL_END_DATE,
    DEADLINE, FOLDER, CNJ_NUMBER, EXECUTOR, DESCRIPTION, STATUS, LINK,
];

/// Date columns, in the order the filter bar shows their ranges.
pub const DATES: [&str; 4] = [START_DATE, EXPECTED_END_DATE, ACTUAL_END_DATE, DEADLINE];
