use arbolitos_riego::{SortKey, Window};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arbolitos-riego")]
#[command(about = "Calendario de riego y constancia de cuidado de mis plantas")]
pub struct Cli {
    /// URI de MongoDB
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017/arbolitos")]
    pub mongo_uri: String,

    /// Base de datos
    #[arg(long, env = "ARBOLITOS_DB", default_value = "arbolitos")]
    pub database: String,

    /// Zona horaria IANA con la que se decide qué día es "hoy"
    #[arg(long, env = "ARBOLITOS_TZ", default_value = "UTC")]
    pub tz: String,

    /// Instante de referencia (RFC 3339); por defecto, ahora
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,

    /// Imprimir JSON en lugar de texto
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estado de riego de cada planta del usuario
    Status {
        #[command(flatten)]
        owner: OwnerArgs,
        /// Orden: name, newest, last-watered, urgency
        #[arg(long, default_value_t = SortKey::Name)]
        sort: SortKey,
    },
    /// Las plantas con más sed
    Urgent {
        #[command(flatten)]
        owner: OwnerArgs,
        /// Cuántas mostrar
        #[arg(short = 'n', long, default_value_t = 3)]
        top: usize,
    },
    /// Calendario mensual de una planta
    Calendar(CalendarArgs),
    /// Riegos requeridos vs. realizados en una ventana de días
    Consistency {
        #[command(flatten)]
        owner: OwnerArgs,
        /// 7d, 1m, 6m, 1y o número de días
        #[arg(short, long, default_value_t = Window::WEEK)]
        window: Window,
    },
    /// Edad del jardín y tasa de supervivencia
    Garden {
        #[command(flatten)]
        owner: OwnerArgs,
    },
    /// Registrar un riego rápido
    Water {
        /// ID de la planta (ObjectId)
        #[arg(long)]
        plant: String,
        /// Notas del riego
        #[arg(long, default_value = "Riego rápido")]
        notes: String,
    },
}

#[derive(Args, Debug)]
pub struct OwnerArgs {
    /// ID del usuario (ObjectId)
    #[arg(long)]
    pub user: String,
}

#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// ID de la planta (ObjectId)
    #[arg(long)]
    pub plant: String,
    /// Año; por defecto el del día de referencia
    #[arg(long, requires = "month")]
    pub year: Option<i32>,
    /// Mes (1-12); por defecto el del día de referencia
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}
