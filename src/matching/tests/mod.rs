mod common;
mod pathway;
mod tiers;
