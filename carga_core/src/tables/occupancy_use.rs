//! Occupancy factors by use (Decreto 351/79, Anexo VII, 3.1.2)
//!
//! Each entry gives the floor area allowance per person for a use type.
//! Forms select an entry by index; the index is stored in the report so
//! the table order is part of the file format. Append only.

use serde::Serialize;

/// One row of the occupancy-use table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OccupancyUse {
    pub description: &'static str,
    /// Floor area per person (m²)
    pub m2_per_person: f64,
}

pub static OCCUPANCY_USES: &[OccupancyUse] = &[
    OccupancyUse {
        description: "Sitios de asambleas, auditorios, salas de conciertos, salas de baile",
        m2_per_person: 1.0,
    },
    OccupancyUse {
        description: "Edificios educacionales, templos",
        m2_per_person: 2.0,
    },
    OccupancyUse {
        description: "Lugares de trabajo, locales, patios y terrazas destinados a comercio, mercados, ferias, exposiciones, restaurantes",
        m2_per_person: 3.0,
    },
    OccupancyUse {
        description: "Salones de billares, canchas de bolos y bochas, gimnasios, pistas de patinaje, refugios nocturnos de caridad",
        m2_per_person: 5.0,
    },
    OccupancyUse {
        description: "Edificio de escritorios y oficinas, bancos, bibliotecas, clínicas, asilos, internados, casas de baile",
        m2_per_person: 8.0,
    },
    OccupancyUse {
        description: "Viviendas privadas y colectivas",
        m2_per_person: 12.0,
    },
    OccupancyUse {
        description: "Edificios industriales (en defecto de declaración del propietario)",
        m2_per_person: 16.0,
    },
    OccupancyUse {
        description: "Salas de juego",
        m2_per_person: 2.0,
    },
    OccupancyUse {
        description: "Grandes tiendas, supermercados, planta baja y 1er subsuelo",
        m2_per_person: 3.0,
    },
    OccupancyUse {
        description: "Grandes tiendas, supermercados, pisos superiores",
        m2_per_person: 8.0,
    },
    OccupancyUse {
        description: "Hoteles, planta baja y restaurantes",
        m2_per_person: 3.0,
    },
    OccupancyUse {
        description: "Hoteles, pisos superiores",
        m2_per_person: 20.0,
    },
    OccupancyUse {
        description: "Depósitos",
        m2_per_person: 30.0,
    },
];

/// Look up an occupancy use by table index
pub fn occupancy_use(index: usize) -> Option<&'static OccupancyUse> {
    OCCUPANCY_USES.get(index)
}
