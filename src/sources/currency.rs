//! Static currency-name source
//!
//! Filters a fixed list of ISO currency names with the match engine. Answers
//! synchronously, in list order, capped at a configurable limit.

use tracing::debug;

use crate::config::DEFAULT_CURRENCY_LIMIT;
use crate::error::ResultExt;
use crate::lookup::{LoadData, Responder};
use crate::matching::PatternBuilder;

pub const CURRENCIES: &[&str] = &[
    "(AED) Arabic dirham",
    "(AFN) afghani",
    "(ALL) lek",
    "(AMD) dram",
    "(ANG) Netherlands Antillean guilder",
    "(AOA) kwanza",
    "(ARS) Argentine peso",
    "(AUD) Australian dollar",
    "(AWG) guilder",
    "(AZN) manat",
    "(BAM) Convertible mark",
    "(BBD) Barbadian dollar",
    "(BDT) taka",
    "(BGN) Bulgarian lev",
    "(BHD) Bahrain dinar",
    "(BIF) Burundi franc",
    "(BMD) Bermudian dollar",
    "(BND) Brunei dollar",
    "(BOB) boliviano",
    "(BRL) Brazilian real",
    "(BSD) Bahamian dollar",
    "(BTN) ngultrum",
    "(BWP) pula",
    "(BYR) Belarus rubel",
    "(BZD) Belize dollar",
    "(CAD) Canadian dollar",
    "(CDF) Congolais franc",
    "(CHF) Swiss franc",
    "(CKD) Cook dollar",
    "(CLP) Chilean peso",
    "(CNY) Renminbi yuan",
    "(COP) Colombian peso",
    "(CRC) colón",
    "(CUP) Cuban peso",
    "(CVE) Cape Verdean escudo",
    "(CZK) Czech krone",
    "(DJF) Djibouti franc",
    "(DKK) Danish krone",
    "(DOP) Dominican peso",
    "(DZD) Algerian dinar",
    "(EGP) Egypt pound",
    "(ERN) nakfa",
    "(ETB) birr",
    "(FJD) Fiji dollar",
    "(FKP) Falklands pound",
    "(FOK) Faroese krona",
    "(GBP) Sterling pound",
    "(GEL) Georgian lari",
    "(GGP) Guernsey pound",
    "(GHS) Ghana cedi",
    "(GIP) Gibraltar pound",
    "(GMD) dalasi",
    "(GNF) Guinea franc",
    "(GTQ) quetzal",
    "(GYD) Guyana dollar",
    "(HKD) Hong Kong dollar",
    "(HNL) lempira",
    "(HTG) gourde",
    "(HUF) Hungarian forint",
    "(IDR) Indonesian rupiah",
    "(ILS) New Israeli sheqel",
    "(IMP) Manx pound",
    "(INR) Indian rupee",
    "(IQD) Iraqi dinar",
    "(IRR) Iranian rial",
    "(ISK) Icelandic krone",
    "(JEP) Jersey Sterling pound",
    "(JMD) Jamaica dollar",
    "(JOD) Jordanian dinar",
    "(JPY) Japanese yen",
    "(KES) Kenian schilling",
    "(KGS) som",
    "(KHR) Cambodian riel",
    "(KID) Kiribati dollar",
    "(KMF) Comorian franc",
    "(KPW) North Korean won",
    "(KRW) South Korean won",
    "(KWD) Kuwaiti dinar",
    "(KYD) Cayman dollar",
    "(KZT) tenge",
    "(LAK) kip",
    "(LBP) Lebanese pound",
    "(LKR) Sri Lanka rupee",
    "(LRD) Liberian dollar",
    "(LSL) Lesotho loti",
    "(LYD) Libyan dinar",
    "(MAD) Moroccan dirham",
    "(MDL) Moldovan leu",
    "(MGA) Malagasy ariary",
    "(MKD) denar",
    "(MMK) kyat",
    "(MNT) tugrik",
    "(MOP) Macanese pataca",
    "(MRO) Mauritanian ouguiya",
    "(MUR) Mauritian rupee",
    "(MVR) Maldivian rufiyaa",
    "(MWK) Malawian kwacha",
    "(MXN) Mexican peso",
    "(MYR) ringgit",
    "(MZN) metical",
    "(NAD) Namibian dollar",
    "(NGN) naira",
    "(NIO) Córdoba oro",
    "(NOK) Norwegian krone",
    "(NPR) Nepalese rupee",
    "(NZD) New Zealand dollar",
    "(OMR) Omani rial",
    "(PAB) Panamanian balboa",
    "(PEN) Nuevo sol",
    "(PGK) kina",
    "(PHP) Philippine peso",
    "(PKR) Pakistanian rupee",
    "(PLN) zloty",
    "(PYG) guaraní",
    "(QAR) Qatari rial",
    "(RON) Romanian leu",
    "(RSD) Serbian dinar",
    "(RUB) Russian rubel",
    "(RWF) Rwandan franc",
    "(SAR) Saudi rial",
    "(SBD) Salomon dollar",
    "(SCR) Seychelles rupee",
    "(SDG) Sudanese pound",
    "(SEK) Swedish krone",
    "(SGD) Singapore dollar",
    "(SHP) St.-Helena pound",
    "(SLL) leone",
    "(SOS) Somalian shilling",
    "(SRD) Surinam dollar",
    "(SSP) South Sudanese pound",
    "(STD) dobra",
    "(SYP) Syrian pound",
    "(SZL) Swazi lilangeni",
    "(THB) Thai baht",
    "(TJS) somoni",
    "(TMT) Turkmen manat",
    "(TND) Tunesian dinar",
    "(TOP) pa'anga",
    "(TRY) Turkish lira",
    "(TTD) Trinidad and Tobago dollar",
    "(TVD) Tuvaluan dollar",
    "(TWD) New Taiwan dollar",
    "(TZS) Tansanian shilling",
    "(UAH) hrywnja",
    "(UGX) Ugandan schilling",
    "(USD) US dollar",
    "(UYU) Uruguay peso",
    "(UZS) Uzbekistan sum",
    "(VND) dong",
    "(VUV) vatu",
    "(WST) tala",
    "(XAF) Central African franc",
    "(XCD) East Caribbean dollar",
    "(XOF) West African franc",
    "(XPF) Pacific franc",
    "(YER) Jemen rial",
    "(ZAR) South African rand",
    "(ZMW) Zambian kwacha",
    "(ZWL) Zimbabwe dollar",
];

#[derive(Debug, Clone)]
pub struct CurrencySource {
    limit: usize,
}

impl Default for CurrencySource {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_LIMIT)
    }
}

impl CurrencySource {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Currencies containing any word of `query`, in list order.
    pub fn filter(&self, query: &str) -> Vec<String> {
        let Some(pattern) = PatternBuilder::new()
            .build(query)
            .warn_on_err("Currency filter pattern")
        else {
            return Vec::new();
        };

        let results: Vec<String> = CURRENCIES
            .iter()
            .filter(|name| pattern.is_match(name))
            .take(self.limit)
            .map(|name| name.to_string())
            .collect();

        debug!(query, count = results.len(), "Filtered currencies");
        results
    }
}

impl LoadData for CurrencySource {
    fn load(&self, query: &str, responder: Responder) {
        responder.resolve(self.filter(query));
    }
}
