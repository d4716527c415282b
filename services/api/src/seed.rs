//! Default 0km catalog inserted on first boot

use crate::models::NewVehicleFields;

pub struct SeedVehicle {
    pub brand: &'static str,
    pub name: &'static str,
    pub price: &'static str,
    pub plan: &'static str,
    pub anticipo: &'static str,
    pub cuota: &'static str,
    pub description: &'static str,
}

impl SeedVehicle {
    pub fn fields(&self) -> NewVehicleFields {
        NewVehicleFields {
            brand: Some(self.brand.to_string()),
            name: Some(self.name.to_string()),
            price: Some(self.price.to_string()),
            financing_plan: Some(self.plan.to_string()),
            down_payment: Some(self.anticipo.to_string()),
            installment: Some(self.cuota.to_string()),
            description: Some(self.description.to_string()),
        }
    }
}

const fn vehicle(
    brand: &'static str,
    name: &'static str,
    price: &'static str,
    plan: &'static str,
    anticipo: &'static str,
    cuota: &'static str,
    description: &'static str,
) -> SeedVehicle {
    SeedVehicle {
        brand,
        name,
        price,
        plan,
        anticipo,
        cuota,
        description,
    }
}

pub const DEFAULT_CATALOG: &[SeedVehicle] = &[
    vehicle(
        "volkswagen",
        "Tera Trend MSI MT MY26",
        "$36.391.350",
        "70/30 • 84 Cuotas",
        "$10.917.405",
        "$347.103",
        "El nuevo Volkswagen Tera Trend representa la evolución del SUV compacto urbano. Equipado con motorización MSI de alta eficiencia que combina potencia y bajo consumo de combustible. Su diseño exterior moderno incluye faros LED, parrilla cromada y llantas de aleación de 17 pulgadas. El interior ofrece climatizador automático, sistema de infoentretenimiento con pantalla táctil de 8 pulgadas compatible con Android Auto y Apple CarPlay, y sensores de estacionamiento traseros. Incluye 6 airbags, control de estabilidad y asistente de arranque en pendiente para máxima seguridad.",
    ),
    vehicle(
        "volkswagen",
        "T-Cross Trendline 200 TSI AT MY26",
        "$52.851.350",
        "70/30 • 84 Cuotas",
        "$15.855.405",
        "$504.100",
        "El Volkswagen T-Cross Trendline 200 TSI AT es el SUV urbano líder del segmento.",
    ),
    vehicle(
        "volkswagen",
        "Nivus Trendline 200 TSI AT MY26",
        "$45.775.000",
        "70/30 • 84 Cuotas",
        "$13.732.500",
        "$436.605",
        "El Volkswagen Nivus es un innovador SUV Coupé que combina diseño deportivo con funcionalidad.",
    ),
    vehicle(
        "volkswagen",
        "Amarok Trendline TDI MT 4x2 MY25",
        "$58.255.550",
        "60/40 • 84 Cuotas",
        "$23.302.220",
        "$508.493",
        "La Volkswagen Amarok Trendline TDI es la pick-up de alta gama.",
    ),
    vehicle(
        "volkswagen",
        "Taos Comfortline 250 TSI AT",
        "$56.942.500",
        "60/40 • 84 Cuotas",
        "$22.777.000",
        "$497.032",
        "El Volkswagen Taos Comfortline es el SUV mediano premium.",
    ),
    vehicle(
        "fiat",
        "Titano Endurance MT 4x4",
        "$52.890.000",
        "70/30 • 84 Cuotas",
        "$15.867.000",
        "$533.219",
        "La nueva Fiat Titano Endurance MT 4x4.",
    ),
    vehicle(
        "fiat",
        "Argo Drive 1.3 MT",
        "$29.780.000",
        "70/30 • 84 Cuotas",
        "$8.934.000",
        "$300.232",
        "El Fiat Argo Drive 1.3 MT.",
    ),
    vehicle(
        "fiat",
        "Cronos Drive 1.3 MT5 Pack Plus",
        "$37.020.000",
        "80/20 • 84 Cuotas",
        "$7.404.000",
        "$422.627",
        "El Fiat Cronos Drive 1.3.",
    ),
    vehicle(
        "fiat",
        "Fastback Turbo 270 AT6",
        "$45.310.000",
        "60/40 • 84 Cuotas",
        "$18.124.000",
        "$396.333",
        "El Fiat Fastback Turbo 270 AT6.",
    ),
    vehicle(
        "fiat",
        "Mobi Trekking 1.0",
        "$27.070.000",
        "80/20 • 84 Cuotas",
        "$5.414.000",
        "$309.036",
        "El Fiat Mobi Trekking 1.0.",
    ),
    vehicle(
        "fiat",
        "Toro Freedom T270 AT6 4x2",
        "$47.250.000",
        "70/30 • 84 Cuotas",
        "$14.175.000",
        "$476.359",
        "La Fiat Toro Freedom T270 AT6 4x2.",
    ),
    vehicle(
        "fiat",
        "Pulse Drive 1.3L MT",
        "$36.670.000",
        "70/30 • 84 Cuotas",
        "$11.001.000",
        "$369.695",
        "El Fiat Pulse Drive 1.3L MT.",
    ),
    vehicle(
        "fiat",
        "Fiorino Endurance 1.4L",
        "$29.310.000",
        "70/30 • 84 Cuotas",
        "$8.793.000",
        "$295.494",
        "El Fiat Fiorino Endurance 1.4L.",
    ),
    vehicle(
        "fiat",
        "Strada Freedom CD",
        "$37.520.000",
        "70/30 • 84 Cuotas",
        "$11.256.000",
        "$378.264",
        "La Fiat Strada Freedom CD.",
    ),
    vehicle(
        "peugeot",
        "208 Allure MT",
        "$36.180.000",
        "Easy 70/30 • 120 Cuotas",
        "$10.854.000",
        "$266.914",
        "El Peugeot 208 Allure MT.",
    ),
    vehicle(
        "peugeot",
        "208 Allure AT",
        "$38.050.000",
        "Plus AT 80/20 • 84 Cuotas",
        "$7.610.000",
        "$385.054",
        "El Peugeot 208 Allure AT.",
    ),
    vehicle(
        "peugeot",
        "2008 Active",
        "$44.510.000",
        "2008 80/20 • 84 Cuotas",
        "$8.902.000",
        "$513.527",
        "El Peugeot 2008 Active.",
    ),
    vehicle(
        "peugeot",
        "2008 Allure T200",
        "$48.760.000",
        "70/30 • 84 Cuotas",
        "$9.752.000",
        "$562.561",
        "El Peugeot 2008 Allure T200.",
    ),
    vehicle(
        "peugeot",
        "Partner Confort 1.6 HDI",
        "$38.070.000",
        "70/30 • 84 Cuotas",
        "$11.421.000",
        "$388.421",
        "El Peugeot Partner Confort 1.6 HDI.",
    ),
    vehicle(
        "peugeot",
        "Expert L3 HDI 120",
        "$57.500.000",
        "70/30 • 84 Cuotas",
        "$17.250.000",
        "$586.072",
        "El Peugeot Expert L3 HDI 120.",
    ),
    vehicle(
        "renault",
        "Kwid Iconic Bitono 1.0",
        "$25.540.000",
        "100% • 120 Cuotas",
        "$7.662.000",
        "$214.167",
        "El Renault Kwid Iconic Bitono 1.0.",
    ),
    vehicle(
        "renault",
        "Kardian Evolution 156 MT",
        "$36.160.000",
        "100% • 120 Cuotas",
        "$10.848.000",
        "$327.588",
        "El Renault Kardian Evolution 156 MT.",
    ),
    vehicle(
        "renault",
        "Kardian Iconic 200 EDC",
        "$44.630.000",
        "75/25 • 84 Cuotas",
        "$11.157.500",
        "$445.131",
        "El Renault Kardian Iconic 200 EDC.",
    ),
    vehicle(
        "renault",
        "Duster Intens 1.6 MT",
        "$41.420.000",
        "100% • 120 Cuotas",
        "$12.426.000",
        "$396.002",
        "El Renault Duster Intens 1.6 MT.",
    ),
    vehicle(
        "renault",
        "Kangoo II Stepway 1.6 SCe",
        "$46.050.000",
        "80% • 120 Cuotas",
        "$9.210.000",
        "$353.467",
        "La Renault Kangoo II Stepway 1.6 SCe.",
    ),
    vehicle(
        "renault",
        "Kangoo II Express 2A 1.6 SCe",
        "$41.400.000",
        "75/25 • 120 Cuotas",
        "$10.350.000",
        "$319.287",
        "La Renault Kangoo II Express 2A 1.6 SCe.",
    ),
    vehicle(
        "renault",
        "Kangoo II Express 5A 1.6 SCe",
        "$45.970.000",
        "75/25 • 120 Cuotas",
        "$11.492.500",
        "$346.288",
        "La Renault Kangoo II Express 5A 1.6 SCe.",
    ),
    vehicle(
        "renault",
        "Master 2.3 dCi 130",
        "$60.970.000",
        "75/25 • 84 Cuotas",
        "$15.242.500",
        "$630.600",
        "El Renault Master 2.3 dCi 130.",
    ),
    vehicle(
        "renault",
        "Oroch Emotion 1.6 SCe 2WD",
        "$42.310.000",
        "60/40 • 84 Cuotas",
        "$16.924.000",
        "$320.803",
        "La Renault Oroch Emotion 1.6 SCe 2WD.",
    ),
    vehicle(
        "renault",
        "Arkana Espirit Alpine",
        "$53.530.000",
        "60/40 • 84 Cuotas",
        "$21.412.000",
        "$443.206",
        "El Renault Arkana Espirit Alpine.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_complete() {
        assert_eq!(DEFAULT_CATALOG.len(), 30);
        assert!(
            DEFAULT_CATALOG
                .iter()
                .all(|v| !v.brand.is_empty() && !v.name.is_empty())
        );
    }

    #[test]
    fn test_seed_fields_map_to_columns() {
        let fields = DEFAULT_CATALOG[7].fields();
        assert_eq!(fields.name.as_deref(), Some("Cronos Drive 1.3 MT5 Pack Plus"));
        assert_eq!(fields.financing_plan.as_deref(), Some("80/20 • 84 Cuotas"));
        assert_eq!(fields.installment.as_deref(), Some("$422.627"));
    }
}
