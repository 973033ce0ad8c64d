// handlers/agenda/mod.rs - Agenda dashboard handlers
//
// All of them share the same query-string filters (AgendaFilters) and resolve
// "today" from the app clock once per request.

pub mod dados;    // GET /api/agenda/dados
pub mod filtros;  // GET /api/agenda/filtros
pub mod grafico;  // GET /api/agenda/grafico/:dimensao
pub mod metricas; // GET /api/agenda/metricas
pub mod semaforo; // GET /api/agenda/semaforo-fatal

pub use dados::dados_get;
pub use filtros::filtros_get;
pub use grafico::grafico_get;
pub use metricas::metricas_get;
pub use semaforo::semaforo_get;
